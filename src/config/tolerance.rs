// ==========================================
// 坐标测量质检系统 - 公差带
// ==========================================
// 规则: [min, max] 闭区间; 未配置公差带的标签恒为合格
// ==========================================

use crate::domain::types::CheckpointLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 公差带（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub min: f64,
    pub max: f64,
}

impl ToleranceBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 两端均包含
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_well_formed(&self) -> bool {
        self.min <= self.max
    }
}

/// 默认公差表（L/M/N 不设公差带）
pub fn default_bands() -> BTreeMap<CheckpointLabel, ToleranceBand> {
    use CheckpointLabel::*;

    let bore = ToleranceBand::new(7.8, 8.2);
    let mut bands = BTreeMap::new();
    bands.insert(A, ToleranceBand::new(24.95, 25.05));
    bands.insert(B, ToleranceBand::new(24.95, 25.05));
    bands.insert(C, ToleranceBand::new(0.0, 0.05));
    bands.insert(D, ToleranceBand::new(99.9, 100.1));
    bands.insert(E, ToleranceBand::new(9.9, 10.1));
    bands.insert(F, ToleranceBand::new(0.0, 0.1));
    bands.insert(G1, bore);
    bands.insert(G2, bore);
    bands.insert(G3, bore);
    bands.insert(G4, bore);
    bands.insert(H, ToleranceBand::new(11.95, 12.05));
    bands.insert(I, ToleranceBand::new(49.9, 50.1));
    bands.insert(J, ToleranceBand::new(5.95, 6.05));
    bands.insert(K, ToleranceBand::new(0.0, 0.2));
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let band = ToleranceBand::new(7.8, 8.2);
        assert!(band.contains(7.8));
        assert!(band.contains(8.2));
        assert!(band.contains(8.0));
        assert!(!band.contains(7.79));
        assert!(!band.contains(8.21));
    }

    #[test]
    fn test_default_bands_share_bore_band() {
        let bands = default_bands();
        let g1 = bands[&CheckpointLabel::G1];
        for label in CheckpointLabel::BORES {
            assert_eq!(bands[&label], g1);
        }
        assert!(!bands.contains_key(&CheckpointLabel::M));
        assert!(bands.values().all(|b| b.is_well_formed()));
    }
}
