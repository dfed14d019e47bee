use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ctrlkit::linalg;

const SIZES: [usize; 3] = [4, 6, 12];

// ---------------------------------------------------------------------------
// Helpers: diagonally dominant and symmetric positive-definite test matrices
// ---------------------------------------------------------------------------

fn dominant(n: usize) -> Vec<f64> {
    let mut a = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            a[i * n + j] = ((i + 1) * 10 + j + 1) as f64 + if i == j { 10.0 * n as f64 } else { 0.0 };
        }
    }
    a
}

fn spd(n: usize) -> Vec<f64> {
    let mut a = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..n {
                let aik = ((i + 1) * (k + 1)) as f64 + if i == k { 10.0 } else { 0.0 };
                let ajk = ((j + 1) * (k + 1)) as f64 + if j == k { 10.0 } else { 0.0 };
                acc += aik * ajk;
            }
            a[i * n + j] = acc;
        }
    }
    a
}

fn to_nalgebra(a: &[f64], n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_row_slice(n, n, a)
}

// ---------------------------------------------------------------------------
// LU decomposition
// ---------------------------------------------------------------------------

fn lu(c: &mut Criterion) {
    let mut g = c.benchmark_group("lu");
    for n in SIZES {
        let a = dominant(n);
        g.bench_with_input(BenchmarkId::new("ctrlkit", n), &a, |b, a| {
            let mut lu = vec![0.0; n * n];
            let mut p = vec![0usize; n];
            b.iter(|| linalg::lup(std::hint::black_box(a), &mut lu, &mut p, n))
        });
        let m = to_nalgebra(&a, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).clone().lu())
        });
    }
    g.finish();
}

fn inverse(c: &mut Criterion) {
    let mut g = c.benchmark_group("inverse");
    for n in SIZES {
        let a = dominant(n);
        g.bench_with_input(BenchmarkId::new("ctrlkit", n), &a, |b, a| {
            let mut ai = vec![0.0; n * n];
            b.iter(|| linalg::inv(&mut ai, std::hint::black_box(a), n))
        });
        let m = to_nalgebra(&a, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).clone().try_inverse())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Cholesky decomposition
// ---------------------------------------------------------------------------

fn cholesky(c: &mut Criterion) {
    let mut g = c.benchmark_group("cholesky");
    for n in SIZES {
        let a = spd(n);
        g.bench_with_input(BenchmarkId::new("ctrlkit", n), &a, |b, a| {
            let mut l = vec![0.0; n * n];
            b.iter(|| linalg::chol(std::hint::black_box(a), &mut l, n))
        });
        let m = to_nalgebra(&a, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).clone().cholesky())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// QR decomposition
// ---------------------------------------------------------------------------

fn qr(c: &mut Criterion) {
    let mut g = c.benchmark_group("qr");
    for n in SIZES {
        let a = dominant(n);
        g.bench_with_input(BenchmarkId::new("ctrlkit", n), &a, |b, a| {
            let mut q = vec![0.0; n * n];
            let mut r = vec![0.0; n * n];
            b.iter(|| linalg::qr(std::hint::black_box(a), Some(q.as_mut_slice()), &mut r, n, n, false))
        });
        let m = to_nalgebra(&a, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| {
                let qr = std::hint::black_box(m).clone().qr();
                (qr.q(), qr.r())
            })
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// SVD
// ---------------------------------------------------------------------------

fn svd(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd");
    for n in SIZES {
        let a = dominant(n);
        g.bench_with_input(BenchmarkId::new("ctrlkit_golub_reinsch", n), &a, |b, a| {
            let (mut u, mut s, mut v) = (vec![0.0; n * n], vec![0.0; n], vec![0.0; n * n]);
            b.iter(|| linalg::svd_golub_reinsch(std::hint::black_box(a), n, n, &mut u, &mut s, &mut v))
        });
        g.bench_with_input(BenchmarkId::new("ctrlkit_jacobi", n), &a, |b, a| {
            let (mut u, mut s, mut v) = (vec![0.0; n * n], vec![0.0; n], vec![0.0; n * n]);
            b.iter(|| linalg::svd_jacobi_one_sided(std::hint::black_box(a), n, 100, &mut u, &mut s, &mut v))
        });
        let m = to_nalgebra(&a, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).clone().svd(true, true))
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Eigenvalues
// ---------------------------------------------------------------------------

fn eigen_symmetric(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigen_symmetric");
    for n in SIZES {
        let a = spd(n);
        g.bench_with_input(BenchmarkId::new("ctrlkit", n), &a, |b, a| {
            let (mut ev, mut d) = (vec![0.0; n * n], vec![0.0; n]);
            b.iter(|| linalg::eig_sym(std::hint::black_box(a), &mut ev, &mut d, n))
        });
        let m = to_nalgebra(&a, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).clone().symmetric_eigen())
        });
    }
    g.finish();
}

fn eigen_general(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigen_general");
    for n in SIZES {
        let a = dominant(n);
        g.bench_with_input(BenchmarkId::new("ctrlkit", n), &a, |b, a| {
            let (mut wr, mut wi) = (vec![0.0; n], vec![0.0; n]);
            b.iter(|| linalg::eig(std::hint::black_box(a), &mut wr, &mut wi, n))
        });
        let m = to_nalgebra(&a, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).complex_eigenvalues())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Matrix exponential
// ---------------------------------------------------------------------------

fn expm(c: &mut Criterion) {
    let mut g = c.benchmark_group("expm");
    for n in SIZES {
        let a: Vec<f64> = dominant(n).iter().map(|v| v * 1e-3).collect();
        g.bench_with_input(BenchmarkId::new("ctrlkit", n), &a, |b, a| {
            let mut e = vec![0.0; n * n];
            b.iter(|| linalg::expm(&mut e, std::hint::black_box(a), n))
        });
        let m = to_nalgebra(&a, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| std::hint::black_box(m).exp())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    lu,
    inverse,
    cholesky,
    qr,
    svd,
    eigen_symmetric,
    eigen_general,
    expm,
);
criterion_main!(benches);
