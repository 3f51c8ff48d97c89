use anyhow::Result;
use common::Config;
use joseki::{PruneOptions, DEFAULT_MAX_LEN};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExtractOptions {
    pub max_len: usize,
    pub max_records_per_archive: usize,
    pub max_record_bytes: u64,
    pub parallelism: usize,
    pub channel_size: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            max_records_per_archive: 6000,
            max_record_bytes: 4 * 1024 * 1024,
            parallelism: 4,
            channel_size: 1000,
        }
    }
}

impl Config for ExtractOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        let default = Self::default();

        Ok(Self {
            max_len: config
                .get("max_len")
                .and_then(|v| v.as_usize())
                .unwrap_or(default.max_len),
            max_records_per_archive: config
                .get("max_records_per_archive")
                .and_then(|v| v.as_usize())
                .unwrap_or(default.max_records_per_archive),
            max_record_bytes: config
                .get("max_record_bytes")
                .and_then(|v| v.as_usize())
                .map(|v| v as u64)
                .unwrap_or(default.max_record_bytes),
            parallelism: config
                .get("parallelism")
                .and_then(|v| v.as_usize())
                .unwrap_or(default.parallelism),
            channel_size: config
                .get("channel_size")
                .and_then(|v| v.as_usize())
                .unwrap_or(default.channel_size),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PostprocessOptions {
    pub min_fraction: f64,
    pub min_absolute: u64,
}

impl PostprocessOptions {
    pub fn prune_options(&self) -> PruneOptions {
        PruneOptions {
            min_fraction: self.min_fraction,
            min_absolute: self.min_absolute,
        }
    }
}

impl Default for PostprocessOptions {
    fn default() -> Self {
        let prune = PruneOptions::default();

        Self {
            min_fraction: prune.min_fraction,
            min_absolute: prune.min_absolute,
        }
    }
}

impl Config for PostprocessOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        let default = Self::default();

        Ok(Self {
            min_fraction: config
                .get("min_fraction")
                .and_then(|v| v.as_f64())
                .unwrap_or(default.min_fraction),
            min_absolute: config
                .get("min_absolute")
                .and_then(|v| v.as_usize())
                .map(|v| v as u64)
                .unwrap_or(default.min_absolute),
        })
    }
}

#[cfg(test)]
mod tests {
    use common::ConfigLoader;

    use super::*;

    #[test]
    fn test_defaults_without_config() {
        let config = ConfigLoader::env_only("extract".to_string());
        let options: ExtractOptions = config.load().unwrap();

        assert_eq!(options.max_len, 45);
        assert_eq!(options.max_records_per_archive, 6000);
        assert_eq!(options.max_record_bytes, 4 * 1024 * 1024);
    }

    #[test]
    fn test_load_from_scope() {
        let config = ConfigLoader::from_hocon_str(
            "extract { max_len = 30, parallelism = 2 }\npostprocess { min_fraction = 0.05, min_absolute = 3 }",
            "postprocess".to_string(),
        )
        .unwrap();

        let options: PostprocessOptions = config.load().unwrap();

        assert_eq!(
            options.prune_options(),
            PruneOptions {
                min_fraction: 0.05,
                min_absolute: 3
            }
        );
    }
}
