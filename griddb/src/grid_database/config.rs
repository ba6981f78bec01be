use super::types::TypeTag;
use crate::error::{GridError, GridResult};

pub(crate) const MAX_BUCKET_WIDTH_BITS: u32 = 16;
pub(crate) const MAX_BUCKET_ROW_BITS: u32 = 10;

#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Cell width is `1 << bucket_width_bits` world units.
    pub bucket_width_bits: u32,
    /// The grid is `1 << bucket_row_bits` buckets on each side.
    pub bucket_row_bits: u32,
    /// Bucket entries reserved in the shared allocator when the database is created.
    pub entry_reserve: usize,
    /// Types that get a dedicated list alongside the main registry.
    pub hot_types: Vec<TypeTag>,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            // 256-unit cells on a 16x16 grid
            bucket_width_bits: 8,
            bucket_row_bits: 4,
            entry_reserve: 4000,
            hot_types: Vec::new(),
        }
    }
}

impl GridConfig {
    pub fn with_hot_types(mut self, hot_types: &[TypeTag]) -> Self {
        self.hot_types = hot_types.to_vec();
        self
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.bucket_width_bits > MAX_BUCKET_WIDTH_BITS {
            return Err(GridError::InvalidConfig {
                field: "bucket_width_bits",
                value: self.bucket_width_bits,
            });
        }
        if self.bucket_row_bits == 0 || self.bucket_row_bits > MAX_BUCKET_ROW_BITS {
            return Err(GridError::InvalidConfig {
                field: "bucket_row_bits",
                value: self.bucket_row_bits,
            });
        }
        Ok(())
    }

    pub fn cell_width(&self) -> u32 {
        1 << self.bucket_width_bits
    }

    pub fn row_count(&self) -> u32 {
        1 << self.bucket_row_bits
    }

    /// World distance along one axis after which bucket coordinates alias.
    ///
    /// Objects further apart than this share buckets. Queries stay exact, but
    /// they visit more candidates.
    pub fn world_span(&self) -> u64 {
        (self.cell_width() as u64) * (self.row_count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_width(), 256);
        assert_eq!(config.row_count(), 16);
        assert_eq!(config.world_span(), 4096);
    }

    #[test]
    fn rejects_out_of_range_geometry() {
        let config = GridConfig {
            bucket_row_bits: 0,
            ..GridConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GridError::InvalidConfig {
                field: "bucket_row_bits",
                value: 0
            })
        );

        let config = GridConfig {
            bucket_width_bits: 17,
            ..GridConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GridError::InvalidConfig {
                field: "bucket_width_bits",
                value: 17
            })
        );
    }
}
