//! Descriptive statistics over voltage slices

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, `None` for an empty slice
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(libm::sqrt(var))
}

/// Mean and population standard deviation together
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    Some((mean(values)?, std_dev(values)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn population_not_sample_deviation() {
        let (m, s) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(m, 5.0);
        assert_eq!(s, 2.0);
    }

    #[test]
    fn constant_has_zero_spread() {
        assert_eq!(std_dev(&[1500.0; 10]), Some(0.0));
    }
}
