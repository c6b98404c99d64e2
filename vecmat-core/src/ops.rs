//! Pure numeric kernels over slices. Callers are responsible for checking
//! that operand lengths agree; every kernel here assumes they do.

pub fn add(lhs: &[f64], rhs: &[f64]) -> Vec<f64> {
    let mut out = lhs.to_vec();
    for (i, j) in out.iter_mut().zip(rhs.iter()) {
        *i += *j;
    }

    out
}

pub fn sub(lhs: &[f64], rhs: &[f64]) -> Vec<f64> {
    let mut out = lhs.to_vec();
    for (i, j) in out.iter_mut().zip(rhs.iter()) {
        *i -= *j;
    }

    out
}

pub fn neg(src: &[f64]) -> Vec<f64> {
    src.iter().map(|x| -x).collect()
}

pub fn scale(src: &[f64], k: f64) -> Vec<f64> {
    let mut out = src.to_vec();
    for i in out.iter_mut() {
        *i *= k;
    }

    out
}

pub fn dot(lhs: &[f64], rhs: &[f64]) -> f64 {
    let mut score = 0.0;
    for (&i, &j) in lhs.iter().zip(rhs.iter()) {
        score += i * j;
    }

    score
}

/// Dense `n x n` product of two row-major buffers.
pub fn matmul(lhs: &[f64], rhs: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n * n];

    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += lhs[i * n + k] * rhs[k * n + j];
            }
            out[i * n + j] = sum;
        }
    }

    out
}

/// Row-major `n x n` matrix times a length-`n` vector.
pub fn matvec(mat: &[f64], vec: &[f64], n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    mat.chunks_exact(n).map(|row| dot(row, vec)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementwise() {
        assert_eq!(add(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), vec![5.0, 7.0, 9.0]);
        assert_eq!(sub(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), vec![-3.0, -3.0, -3.0]);
        assert_eq!(neg(&[1.0, -2.0]), vec![-1.0, 2.0]);
        assert_eq!(scale(&[1.0, 2.0, 3.0], 2.5), vec![2.5, 5.0, 7.5]);
    }

    #[test]
    fn dot_product() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(dot(&[], &[]), 0.0);
    }

    #[test]
    fn matrix_products() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        assert_eq!(matmul(&a, &b, 2), vec![19.0, 22.0, 43.0, 50.0]);
        assert_eq!(matvec(&a, &[1.0, 2.0], 2), vec![5.0, 11.0]);
    }

    #[test]
    fn empty_products() {
        assert!(matmul(&[], &[], 0).is_empty());
        assert!(matvec(&[], &[], 0).is_empty());
    }
}
