//! Tests for levels and runtime-adjustable levels.

use attrlog::{Level, LevelVar, Leveler};

#[test]
fn named_levels_are_ordered() {
    assert!(Level::TRACE < Level::DEBUG);
    assert!(Level::DEBUG < Level::INFO);
    assert!(Level::INFO < Level::WARN);
    assert!(Level::WARN < Level::ERROR);
    assert_eq!(Level::TRACE.as_i32(), -8);
    assert_eq!(Level::ERROR.as_i32(), 8);
}

#[test]
fn display_names() {
    let names: Vec<String> = Level::all().iter().map(ToString::to_string).collect();
    assert_eq!(names, ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"]);
}

#[test]
fn display_offsets() {
    assert_eq!(Level::new(2).to_string(), "INFO+2");
    assert_eq!(Level::new(-5).to_string(), "TRACE+3");
    assert_eq!(Level::new(-10).to_string(), "TRACE-2");
    assert_eq!(Level::new(12).to_string(), "ERROR+4");
}

#[test]
fn parse_names_case_insensitive() {
    assert_eq!("info".parse::<Level>().unwrap(), Level::INFO);
    assert_eq!("WARN".parse::<Level>().unwrap(), Level::WARN);
    assert_eq!("Warning".parse::<Level>().unwrap(), Level::WARN);
    assert_eq!("err".parse::<Level>().unwrap(), Level::ERROR);
    assert_eq!(" trace ".parse::<Level>().unwrap(), Level::TRACE);
}

#[test]
fn parse_offsets() {
    assert_eq!("info+2".parse::<Level>().unwrap(), Level::new(2));
    assert_eq!("TRACE-1".parse::<Level>().unwrap(), Level::new(-9));
    for level in [Level::new(3), Level::new(-7), Level::new(-12), Level::new(9)] {
        assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
    }
}

#[test]
fn parse_rejects_unknown() {
    assert!("loud".parse::<Level>().is_err());
    assert!("info+x".parse::<Level>().is_err());
    assert!("".parse::<Level>().is_err());
}

#[test]
fn parse_rejects_out_of_range_offsets() {
    assert!("error+2147483647".parse::<Level>().is_err());
    assert!("trace-2147483648".parse::<Level>().is_err());
    assert!("info+99999999999".parse::<Level>().is_err());
    assert_eq!("info+2147483647".parse::<Level>().unwrap(), Level::new(i32::MAX));
}

#[test]
fn level_var_is_shared_between_clones() {
    let var = LevelVar::new(Level::INFO);
    let clone = var.clone();
    clone.set(Level::ERROR);
    assert_eq!(var.level(), Level::ERROR);
}

#[test]
fn level_var_defaults_to_info() {
    assert_eq!(LevelVar::default().level(), Level::INFO);
}
