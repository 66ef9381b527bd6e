//! Benchmarks for tokenization and dispatch.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use clirc_proto::{tokenizer, Category, Dispatcher, GenericMessage, LineWriter, Recognizer};

/// Simple PING message
const SIMPLE_MESSAGE: &str = "PING :irc.example.com";

/// Message with prefix
const PREFIX_MESSAGE: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";

/// Numeric response
const NUMERIC_RESPONSE: &str =
    ":irc.server.net 001 nickname :Welcome to the IRC Network nickname!user@host";

fn benchmark_tokenizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tokenizing");

    group.bench_function("simple_ping", |b| {
        b.iter(|| {
            let params = tokenizer::parameters(black_box(SIMPLE_MESSAGE));
            black_box(params)
        })
    });

    group.bench_function("with_prefix", |b| {
        b.iter(|| {
            let params = tokenizer::parameters(black_box(PREFIX_MESSAGE));
            black_box(params)
        })
    });

    group.bench_function("numeric_response", |b| {
        b.iter(|| {
            let params = tokenizer::parameters(black_box(NUMERIC_RESPONSE));
            black_box(params)
        })
    });

    group.finish();
}

/// A dispatcher with a catalog large enough that priority order matters.
fn wide_dispatcher() -> Dispatcher {
    const COMMANDS: &[&str] = &[
        "ADMIN", "AWAY", "INFO", "INVITE", "ISON", "JOIN", "KICK", "KILL", "LINKS", "LIST",
        "LUSERS", "MODE", "MOTD", "NAMES", "NICK", "NOTICE", "OPER", "PART", "PASS", "PING",
        "PONG", "QUIT", "REHASH", "STATS", "TIME", "TOPIC", "TRACE", "USER", "USERHOST", "VERSION",
        "WALLOPS", "WHO", "WHOIS", "WHOWAS", "PRIVMSG",
    ];
    let mut builder = Dispatcher::builder();
    for &command in COMMANDS {
        builder = builder.recognize(
            Category::Command,
            Recognizer::for_command::<GenericMessage>(command),
        );
    }
    builder.build()
}

fn benchmark_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dispatch");

    // PRIVMSG is registered last; the first dispatch pays for the full
    // trial sweep, every one after hits the promoted front slot.
    group.bench_function("promoted_hot_command", |b| {
        let dispatcher = wide_dispatcher();
        dispatcher.dispatch(PREFIX_MESSAGE).unwrap();
        b.iter(|| {
            let msg = dispatcher.dispatch(black_box(PREFIX_MESSAGE)).unwrap();
            black_box(msg)
        })
    });

    group.bench_function("generic_fallback", |b| {
        let dispatcher = wide_dispatcher();
        b.iter(|| {
            let msg = dispatcher.dispatch(black_box("UNKNOWNCMD a b c")).unwrap();
            black_box(msg)
        })
    });

    group.bench_function("numeric_fallback", |b| {
        let dispatcher = wide_dispatcher();
        b.iter(|| {
            let msg = dispatcher.dispatch(black_box(NUMERIC_RESPONSE)).unwrap();
            black_box(msg)
        })
    });

    group.finish();
}

fn benchmark_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Serialization");

    group.bench_function("privmsg", |b| {
        let mut writer = LineWriter::new();
        b.iter(|| {
            writer.set_sender("nick!user@host");
            writer.push("PRIVMSG");
            writer.push("#channel");
            writer.push("Hello, world!");
            let line = writer.write();
            black_box(line)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenizing,
    benchmark_dispatch,
    benchmark_serialization
);
criterion_main!(benches);
