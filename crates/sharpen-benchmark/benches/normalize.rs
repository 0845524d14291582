use std::hint::black_box;

use codspeed_criterion_compat::{Criterion, Throughput, criterion_group, criterion_main};
use sharpen_fmt::{NormalizeOptions, normalize_whitespace};
use sharpen_parse::parse_compilation_unit;
use sharpen_syntax::ParseOptions;

static METHOD: &str = "void M(int a,int b){if(a<b){return;}var list=new List<int>{a,b};foreach(var x in list)Console.WriteLine(x);}";

fn benchmark_normalize(c: &mut Criterion) {
    let text = format!("namespace N{{class C{{{}}}}}", METHOD.repeat(50));
    let root = parse_compilation_unit(&text, &ParseOptions::default());
    let options = NormalizeOptions::default();

    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("normalize_whitespace", |b| {
        b.iter(|| black_box(normalize_whitespace(&root, &options)));
    });
    group.finish();
}

criterion_group!(benches, benchmark_normalize);
criterion_main!(benches);
