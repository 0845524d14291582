use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use sharpen_inputs::File;
use sharpen_parse::{FileParse as _, parse_syntax_tree};

static SIMPLE: &str = r#"
class Program
{
    static void Main() => System.Console.WriteLine("Hello");
}
"#;

static MEDIUM: &str = r#"
using System;
using System.Collections.Generic;

namespace Shapes
{
    /// <summary>A point.</summary>
    public readonly record struct Point(int X, int Y);

    public class Polygon
    {
        private readonly List<Point> points = new List<Point>();

        public int Count => points.Count;

        public void Add(Point point)
        {
#if DEBUG
            Console.WriteLine($"adding {point.X},{point.Y}");
#endif
            points.Add(point);
        }

        public double Perimeter()
        {
            double total = 0;
            for (int i = 0; i < points.Count; i++)
            {
                var a = points[i];
                var b = points[(i + 1) % points.Count];
                total += Math.Sqrt((a.X - b.X) * (a.X - b.X) + (a.Y - b.Y) * (a.Y - b.Y));
            }
            return total;
        }
    }
}
"#;

fn benchmark_parser(c: &mut Criterion) {
    let db = salsa::DatabaseImpl::new();
    let files = [File::from_text(&db, "Simple", SIMPLE), File::from_text(&db, "Medium", MEDIUM)];

    let mut group = c.benchmark_group("Parser Benchmark");

    for file in files {
        let code_length = file.text(&db).len() as u64;
        group.throughput(Throughput::Bytes(code_length));
        group.bench_with_input(
            BenchmarkId::new("parse_code", file.path(&db)),
            &file,
            |b, &file| {
                b.iter(|| {
                    let tree =
                        parse_syntax_tree(file.text(&db), file.options(&db), file.path(&db).clone());
                    black_box(tree);
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("parse_cached", file.path(&db)),
            &file,
            |b, &file| {
                b.iter(|| {
                    black_box(file.parse(&db));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
