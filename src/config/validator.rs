//! Configuration validation

use super::*;
use crate::distribution::bounds::MAX_BUDGET;
use crate::error::SamplerError;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_generator(&config.generator)?;
    validate_ratios(&config.bounds)?;
    validate_bounds(&config.bounds())?;
    validate_output(&config.output, &config.output_path())?;

    Ok(())
}

/// Validate generator configuration
pub fn validate_generator(generator: &GeneratorConfig) -> Result<()> {
    if generator.records == 0 {
        anyhow::bail!("generator.records must be at least 1");
    }

    if generator.max_attempts == 0 {
        anyhow::bail!("generator.max_attempts must be at least 1");
    }

    Ok(())
}

/// Validate proportional bound constants
pub fn validate_ratios(ratios: &BoundsRatios) -> Result<()> {
    let named = [
        ("mbu2_min_pct", ratios.mbu2_min_pct),
        ("mbu2_max_pct", ratios.mbu2_max_pct),
        ("mbu3_max_pct", ratios.mbu3_max_pct),
        ("mbun_max_pct", ratios.mbun_max_pct),
    ];
    for (name, pct) in named {
        if pct > 100 {
            anyhow::bail!("bounds.{} must be between 0 and 100, got {}", name, pct);
        }
    }

    if ratios.mbu2_min_pct > ratios.mbu2_max_pct {
        anyhow::bail!(
            "bounds.mbu2_min_pct ({}) must not exceed bounds.mbu2_max_pct ({})",
            ratios.mbu2_min_pct,
            ratios.mbu2_max_pct
        );
    }

    Ok(())
}

/// Validate the bounds derived for the configured budget
///
/// Catches a budget past [`MAX_BUDGET`], an empty MBU2 range, and bounds
/// whose smallest candidate already overshoots the budget.
pub fn validate_bounds(bounds: &BoundsConfig) -> Result<()> {
    bounds.validate().context("Invalid class bounds")?;

    if bounds.min_flip_bits() > bounds.budget {
        return Err(SamplerError::Unsatisfiable {
            min_flip_bits: bounds.min_flip_bits(),
            budget: bounds.budget,
        })
        .context("Invalid class bounds");
    }

    if bounds.max_flip_bits() > bounds.budget {
        warn!(
            max_flip_bits = bounds.max_flip_bits(),
            budget = bounds.budget,
            "largest candidate overshoots the budget, some attempts will be rejected"
        );
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig, record_path: &Path) -> Result<()> {
    if record_path.is_dir() {
        anyhow::bail!("output path {} is a directory", record_path.display());
    }

    if let Some(ref summary) = output.summary_json {
        if summary == record_path {
            anyhow::bail!(
                "summary_json and the record file must differ, both are {}",
                summary.display()
            );
        }
    }

    Ok(())
}
