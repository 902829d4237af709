//! Gait setup decoding and persistence

use super::types::GaitConfig;
use crate::error::Error;

impl GaitConfig {
    /// Parse and validate a setup from TOML text
    #[cfg(feature = "config")]
    pub fn from_toml(input: &str) -> Result<Self, Error> {
        let config: GaitConfig = toml::from_str(input).map_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("TOML parse error: {:?}", defmt::Debug2Format(&_e));
            Error::Config
        })?;

        config.validate()?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Gait setup: {} schedules, total time {}",
            config.schedules.len(),
            config.total_time
        );

        Ok(config)
    }

    /// Serialize into `buf` as postcard binary, returning the used part
    pub fn to_postcard<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], Error> {
        postcard::to_slice(self, buf).map_err(|_| Error::Config)
    }

    /// Decode and validate a postcard binary setup
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, Error> {
        let config: GaitConfig = postcard::from_bytes(bytes).map_err(|_| Error::Config)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleConfig;
    #[cfg(feature = "config")]
    use crate::config::{CONFIG_VERSION, DEFAULT_MIN_PHASE_DURATION};

    #[cfg(feature = "config")]
    const TROT: &str = r#"
total_time = 1.0

[[schedules]]
ee = 0
first_phase_in_contact = true
durations = [0.2, 0.3, 0.5]
min_phase_duration = 0.05
max_phase_duration = 1.5

[[schedules]]
ee = 1
first_phase_in_contact = false
durations = [0.4, 0.6]
"#;

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml() {
        let config = GaitConfig::from_toml(TROT).unwrap();

        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.total_time, 1.0);
        assert_eq!(config.schedules.len(), 2);

        let front = &config.schedules[0];
        assert_eq!(front.durations.as_slice(), &[0.2, 0.3, 0.5]);
        assert_eq!(front.min_phase_duration, 0.05);
        assert_eq!(front.max_phase_duration, 1.5);

        // Bounds fall back to defaults
        let hind = &config.schedules[1];
        assert_eq!(hind.min_phase_duration, DEFAULT_MIN_PHASE_DURATION);
        assert!(!hind.first_phase_in_contact);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_matches_direct_construction() {
        use crate::traits::Variable;

        let vars = GaitConfig::from_toml(TROT).unwrap().build_variables().unwrap();
        let direct =
            crate::schedule::ContactSchedule::new(0, 1.0, &[0.2, 0.3, 0.5], true, 0.05, 1.5)
                .unwrap();

        let built = vars.schedule(0).unwrap();
        assert_eq!(built.values(), direct.values());
        assert_eq!(built.contact_sequence(), direct.contact_sequence());
        assert_eq!(built.name(), direct.name());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_invalid() {
        assert_eq!(
            GaitConfig::from_toml("total_time = \"soon\"").unwrap_err(),
            Error::Config
        );

        let negative = "total_time = 1.0\n[[schedules]]\nee = 0\nfirst_phase_in_contact = true\ndurations = [0.5, -0.5]\n";
        assert!(matches!(
            GaitConfig::from_toml(negative),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_postcard_round_trip() {
        let mut config = GaitConfig::new(1.2);
        config
            .push(ScheduleConfig::new(3, true, &[0.3, 0.4, 0.5]).unwrap())
            .unwrap();

        let mut buf = [0u8; 256];
        let bytes = config.to_postcard(&mut buf).unwrap();
        let decoded = GaitConfig::from_postcard(bytes).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_postcard_buffer_too_small() {
        let mut config = GaitConfig::new(1.0);
        config
            .push(ScheduleConfig::new(0, true, &[0.5, 0.5]).unwrap())
            .unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(config.to_postcard(&mut buf).unwrap_err(), Error::Config);
    }

    #[test]
    fn test_postcard_garbage() {
        assert_eq!(GaitConfig::from_postcard(&[0xFF; 3]).unwrap_err(), Error::Config);
    }
}
