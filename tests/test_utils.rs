#![allow(dead_code)] // Each test binary uses a different subset of helpers

use std::path::PathBuf;

use bs_calc::{OptionType, PricingRequest};

/// Standard textbook case: S=100, K=100, T=1, r=5%, σ=20%
pub fn reference_request() -> PricingRequest {
    PricingRequest::new(100.0, 100.0, 1.0, 0.05, 0.2).expect("reference request is valid")
}

/// Grid of valid requests spanning moneyness, maturity, rates and volatility
pub fn request_grid() -> Vec<PricingRequest> {
    let mut grid = Vec::new();
    for &spot in &[50.0, 90.0, 100.0, 110.0, 200.0] {
        for &strike in &[80.0, 100.0, 125.0] {
            for &t in &[1.0 / 365.0, 0.25, 1.0, 5.0] {
                for &r in &[-0.01, 0.0, 0.05] {
                    for &vol in &[0.01, 0.2, 0.8] {
                        grid.push(
                            PricingRequest::new(spot, strike, t, r, vol)
                                .expect("grid request is valid"),
                        );
                    }
                }
            }
        }
    }
    grid
}

pub fn both_types() -> [OptionType; 2] {
    [OptionType::Call, OptionType::Put]
}

/// Unique path in the system temp directory
pub fn temp_path(name: &str, extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "bs_calc_{}_{}.{}",
        name,
        std::process::id(),
        extension
    ))
}
