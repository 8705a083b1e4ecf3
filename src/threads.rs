use std::iter::zip;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use log::debug;

use crate::solver::Solver;

pub trait Split: Sized + Clone {
    fn split_parts(&self, n: usize) -> Vec<Self>;

    fn join_parts(&self, parts: &[Self]) -> Self;

    fn parts(&self, n: usize) -> Vec<SplitPart<Self>> {
        self.split_parts(n)
            .into_iter()
            .enumerate()
            .map(|(n, part)| SplitPart::new(part, n))
            .collect()
    }
}

/// Boundaries of `n` contiguous ranges covering `0..len`, the first
/// `len % n` ranges one longer than the rest.
pub fn ranges(len: usize, n: usize) -> Vec<(usize, usize)> {
    let size = len / n;
    let size_xtra = len % n;

    let mut start = 0;
    let mut ranges = Vec::with_capacity(n);
    for i in 0..n {
        let end = start + size + usize::from(i < size_xtra);
        ranges.push((start, end));
        start = end;
    }
    ranges
}

impl<T> Split for Vec<T>
where
    T: Clone,
{
    fn split_parts(&self, n: usize) -> Vec<Self> {
        ranges(self.len(), n)
            .into_iter()
            .map(|(start, end)| self[start..end].to_vec())
            .collect()
    }

    fn join_parts(&self, parts: &[Self]) -> Self {
        let mut v: Vec<T> = self.clone();
        for p in parts {
            v.extend_from_slice(p);
        }
        v
    }
}

#[derive(Debug, Clone)]
pub struct JoinError;

#[derive(Debug)]
pub struct SplitPart<T: Split> {
    pub n: usize,
    pub part: T,
}

impl<T> SplitPart<T>
where
    T: Split,
{
    pub fn new(part: T, n: usize) -> Self {
        Self { part, n }
    }

    pub fn join(splits: Vec<SplitPart<T>>) -> Result<T, JoinError> {
        let n = splits.len();
        if n == 0 {
            return Err(JoinError);
        }
        let mut parts: Vec<Option<T>> = vec![None; n];
        for s in splits {
            if s.n >= n || parts[s.n].is_some() {
                return Err(JoinError);
            }
            parts[s.n] = Some(s.part);
        }
        // n distinct indices below n: every slot is filled
        let parts: Vec<T> = parts.into_iter().flatten().collect();
        Ok(parts[0].join_parts(&parts[1..]))
    }
}

pub trait Threaded<T>
where
    T: Split,
{
    fn threaded(&self, n: usize) -> ThreadedSolver<T>;
}

impl<S, T> Threaded<T> for S
where
    T: Split + Send + 'static,
    S: Solver<T> + Send + 'static + Clone,
{
    fn threaded(&self, n: usize) -> ThreadedSolver<T> {
        ThreadedSolver::with_cloned_solvers(n, self)
    }
}

/// Solve on the calling thread when `threads` is zero, otherwise on a pool
/// of `threads` workers each holding a clone of `solver`.
pub fn make_solver<S, T>(solver: S, threads: usize) -> Box<dyn Solver<T>>
where
    T: Split + Send + 'static,
    S: Solver<T> + Send + 'static + Clone,
{
    if threads == 0 {
        Box::new(solver)
    } else {
        Box::new(ThreadedSolver::with_cloned_solvers(threads, &solver))
    }
}

type Outcome<T> = thread::Result<SplitPart<T>>;

struct Worker<T>
where
    T: Split,
{
    tx: mpsc::Sender<SplitPart<T>>,
}

impl<T> Worker<T>
where
    T: Split,
{
    fn new<S>(solver: S, sol_tx: mpsc::Sender<Outcome<T>>) -> Self
    where
        S: Solver<T> + Send + 'static,
        T: Split + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<SplitPart<T>>();
        thread::spawn(move || loop {
            let splitted = match rx.recv() {
                Ok(s) => s,
                Err(_) => return,
            };
            let n = splitted.n;
            let soln = panic::catch_unwind(AssertUnwindSafe(|| solver.solve(&splitted.part)));
            let failed = soln.is_err();
            // a panicked worker reports once and exits
            if sol_tx.send(soln.map(|s| SplitPart::new(s, n))).is_err() || failed {
                return;
            }
        });

        Self { tx }
    }

    fn send(&self, part: SplitPart<T>) {
        self.tx.send(part).expect("solver thread exited");
    }
}

/// Fixed pool of solver threads. Each `solve` sends one row band to every
/// worker and joins the answers in order.
///
/// Only the workers hold senders to the result channel, so the pool sees a
/// disconnect rather than blocking once they are all gone. A panic inside a
/// worker is resumed on the calling thread.
pub struct ThreadedSolver<T>
where
    T: Split,
{
    workers: Vec<Worker<T>>,
    rx: mpsc::Receiver<Outcome<T>>,
}

impl<T> ThreadedSolver<T>
where
    T: Split + Send + 'static,
{
    pub fn with_cloned_solvers<S>(n: usize, solver: &S) -> Self
    where
        S: Solver<T> + Send + 'static + Clone,
    {
        let (tx, rx) = mpsc::channel();
        let workers = (0..n)
            .map(|_| Worker::new(solver.clone(), tx.clone()))
            .collect();
        debug!("started {} solver threads", n);
        Self { workers, rx }
    }
}

impl<T> Solver<T> for ThreadedSolver<T>
where
    T: Split,
{
    fn solve(&self, state: &T) -> T {
        let sn = self.workers.len();
        assert!(sn > 0, "no workers");

        for (worker, part) in zip(&self.workers, state.parts(sn)) {
            worker.send(part);
        }
        let mut parts: Vec<SplitPart<T>> = Vec::with_capacity(sn);
        for _ in 0..sn {
            match self.rx.recv() {
                Ok(Ok(part)) => parts.push(part),
                Ok(Err(payload)) => panic::resume_unwind(payload),
                Err(_) => panic!("solver threads exited"),
            }
        }
        SplitPart::join(parts).expect("worker returned a duplicate part")
    }
}
