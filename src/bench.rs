//! Minimal timing harness for the `harness = false` benches.

use std::fs;
use std::io::{self, stdout, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct Benchmark {
    f: Rc<dyn Fn()>,
    name: String,
    iterations: usize,
}

#[derive(Clone, Debug)]
pub struct BenchmarkResult {
    pub name: String,
    pub iterations: usize,
    pub total: Duration,
}

impl BenchmarkResult {
    pub fn per_call(&self) -> Duration {
        self.total.div_f64(self.iterations.max(1) as f64)
    }
}

#[derive(Debug, PartialEq)]
pub enum Unit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
}

impl Unit {
    pub fn format(&self, d: &Duration, width: usize) -> String {
        let (symbol, value) = match self {
            Self::Nanosecond => ("ns", d.as_nanos()),
            Self::Microsecond => ("us", d.as_micros()),
            Self::Millisecond => ("ms", d.as_millis()),
            Self::Second => ("s", d.as_secs() as u128),
        };
        format!("{:>width$}{:<2}", value, symbol)
    }

    /// Largest unit in which `d` still reads as at least `treshold`.
    pub fn scaled(d: &Duration, treshold: u128) -> Self {
        if d.as_nanos() < treshold {
            Self::Nanosecond
        } else if d.as_micros() < treshold {
            Self::Microsecond
        } else if d.as_millis() < treshold {
            Self::Millisecond
        } else {
            Self::Second
        }
    }
}

impl Benchmark {
    pub fn iter<F: Fn() + 'static>(name: &str, n: usize, f: F) -> Self {
        Self {
            f: Rc::new(f),
            name: name.to_string(),
            iterations: n,
        }
    }

    pub fn once<F: Fn() + 'static>(name: &str, f: F) -> Self {
        Self::iter(name, 1, f)
    }

    pub fn run(&self) -> BenchmarkResult {
        let start = Instant::now();
        for _ in 0..self.iterations {
            (self.f)();
        }
        BenchmarkResult {
            name: self.name.clone(),
            iterations: self.iterations,
            total: start.elapsed(),
        }
    }
}

#[derive(Default)]
pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bench(&mut self, bench: Benchmark) {
        self.benches.push(bench);
    }

    pub fn with_benches(benches: &[Benchmark]) -> Self {
        let mut this = Self::new();
        for bench in benches {
            this.add_bench(bench.clone());
        }
        this
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    pub fn run(&mut self) -> io::Result<()> {
        for bench in &self.benches {
            self.results.push(bench.run());
            print!(".");
            stdout().flush()?;
        }
        println!();
        Ok(())
    }

    pub fn show(&self) {
        println!(
            "  {: <30} {: >8}   {: >8}",
            "benchmark", "total", "per_call"
        );
        for result in &self.results {
            let (t, t_per_call) = (result.total, result.per_call());
            println!(
                "  {: <30} {}   {}",
                result.name,
                Unit::scaled(&t, 100000).format(&t, 6),
                Unit::scaled(&t_per_call, 100000).format(&t_per_call, 6),
            )
        }
    }

    pub fn write_csv<P: AsRef<Path>>(&self, filename: P) -> io::Result<()> {
        let mut lines: Vec<String> = vec!["benchmark,total_us,iterations,per_call_us".to_string()];
        for result in &self.results {
            lines.push(format!(
                "{},{},{},{}",
                result.name,
                result.total.as_micros(),
                result.iterations,
                result.per_call().as_micros(),
            ));
        }
        lines.push("".to_string());
        fs::write(filename, lines.join("\n"))
    }

    pub fn report(&mut self, name: &str) -> io::Result<()> {
        print!("Benchmark: {}", name);
        self.run()?;
        self.show();
        self.write_csv(format!("benchmark_{}.csv", name))
    }
}
