use attrlog::buffering::BufferingHandler;
use attrlog::fmt::{needs_quoting, quote};
use attrlog::{
    Attr, CliHandler, CliHandlerOptions, ColorChoice, Handler, HandlerOptions, JsonHandler, Level,
    Logger, Record, TextHandler,
};
use std::hint::black_box;
use std::io;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};

fn sample_record() -> Record {
    Record::new(Level::INFO, "request finished").with_attrs([
        Attr::string("method", "GET"),
        Attr::string("path", "/api/v1/users"),
        Attr::int("status", 200),
        Attr::duration("took", std::time::Duration::from_micros(1840)),
        Attr::group("client", [Attr::string("ip", "10.0.0.7"), Attr::string("agent", "curl 8.5")]),
    ])
}

fn bench_cli_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("CliHandler::format_record");
    let record = sample_record();

    let handler = CliHandler::new(io::sink(), CliHandlerOptions::new());
    group.bench_function("plain", |b| {
        b.iter(|| handler.format_record(black_box(&record)));
    });

    let scoped: Arc<dyn Handler> = Arc::new(CliHandler::new(
        io::sink(),
        CliHandlerOptions::new().color(ColorChoice::Always),
    ));
    let scoped = scoped
        .with_attrs(vec![Attr::string("service", "api")])
        .with_group("http");
    let ctx = attrlog::Context::background();
    group.bench_function("scoped_colored_handle", |b| {
        b.iter(|| scoped.handle(&ctx, black_box(&record)));
    });

    group.finish();
}

fn bench_text_and_json(c: &mut Criterion) {
    let record = sample_record();

    let text = TextHandler::new(io::sink(), HandlerOptions::new());
    c.bench_function("TextHandler::format_record", |b| {
        b.iter(|| text.format_record(black_box(&record)));
    });

    let json = JsonHandler::new(io::sink(), HandlerOptions::new());
    c.bench_function("JsonHandler::to_object", |b| {
        b.iter(|| json.to_object(black_box(&record)));
    });
}

fn bench_quoting(c: &mut Criterion) {
    let mut group = c.benchmark_group("quoting");
    group.bench_function("needs_quoting/plain", |b| {
        b.iter(|| needs_quoting(black_box("plain-value_123")));
    });
    group.bench_function("needs_quoting/spaced", |b| {
        b.iter(|| needs_quoting(black_box("a value with spaces")));
    });
    group.bench_function("quote", |b| {
        b.iter(|| quote(black_box("say \"hi\"\tthere")));
    });
    group.finish();
}

fn bench_buffer_replay(c: &mut Criterion) {
    let downstream: Arc<dyn Handler> = Arc::new(TextHandler::new(io::sink(), HandlerOptions::new()));

    c.bench_function("BufferingHandler::emit_to/100", |b| {
        b.iter(|| {
            let buffer = BufferingHandler::new();
            let logger = Logger::new(Arc::new(buffer.clone())).with_group("job");
            for i in 0..100 {
                logger.info("step", [Attr::int("i", i)]);
            }
            buffer.emit_to(Some(&downstream))
        });
    });
}

criterion_group!(
    benches,
    bench_cli_format,
    bench_text_and_json,
    bench_quoting,
    bench_buffer_replay
);
criterion_main!(benches);
