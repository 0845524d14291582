use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use sharpen_syntax::{ParseOptions, SyntaxKind};
use sharpen_tokenizer::Tokenizer;

static LINE: &str = "foo(bar, ref baz) { x += y >> 2; if (a != b && c <= d) return $\"{e,4:N2}\"; } // done\n";

static IDENTIFIERS: &str =
    "customerName orderTotal _pending @class isReady Count value1 \\u0061lpha partial async record \
     customerName orderTotal _pending @class isReady Count value1 \\u0061lpha partial async record \
     customerName orderTotal _pending @class isReady Count value1 \\u0061lpha partial async record";

fn iterate(s: &str, options: &ParseOptions) {
    let mut tokenizer = Tokenizer::new(s, options);

    loop {
        let token = tokenizer.next_token();
        if token.kind == SyntaxKind::END_OF_FILE {
            break;
        }
        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let source = LINE.repeat(30);
    let candidates = [("identifiers", IDENTIFIERS), ("keywords_operators_and_punctuation", source.as_str())];
    let options = ParseOptions::default();
    let mut group = c.benchmark_group("iterate");

    for (name, text) in candidates {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(name, &text, |b, &s| b.iter(|| iterate(s, &options)));
    }

    group.finish();
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
