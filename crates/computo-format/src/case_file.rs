//! Case files: a whole expedient stored as JSON, YAML, or TOML.
//!
//! ```yaml
//! start: 01/01/2020
//! causes:
//!   - { years: 2, months: 0, days: 0, credit_days: 10 }
//!   - { years: 0, months: 6, days: 0, regime: "1/2" }
//! config:
//!   view: doctrinal
//!   global_credit_days: 30
//! tm: 03/05/2021
//! ```

use std::path::Path;

use chrono::NaiveDate;
use computo_core::{
    Cause, ChainConfig, ComputoError, Expedient, InputError, MinimumOverrides, Regime, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dates::serde_dmy;

/// One cause as written in a case file. Components are signed so that
/// negative values can be read and normalised instead of rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCause {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    #[serde(alias = "credit")]
    pub credit_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regime: Option<Regime>,
}

impl RawCause {
    #[must_use]
    pub fn to_cause(&self) -> Cause {
        let cause = Cause::from_signed(self.years, self.months, self.days, self.credit_days);
        match self.regime {
            Some(regime) => cause.with_regime(regime),
            None => cause,
        }
    }
}

/// On-disk representation of an [`Expedient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    #[serde(with = "serde_dmy")]
    pub start: NaiveDate,
    #[serde(default, with = "serde_dmy::option", skip_serializing_if = "Option::is_none")]
    pub tm: Option<NaiveDate>,
    #[serde(default, with = "serde_dmy::option", skip_serializing_if = "Option::is_none")]
    pub tmbi: Option<NaiveDate>,
    // TOML: tables must follow plain values.
    #[serde(default)]
    pub causes: Vec<RawCause>,
    /// Policy for this case; the caller's defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ChainConfig>,
}

/// Serialisation format of a case file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFormat {
    Json,
    Yaml,
    Toml,
}

impl CaseFormat {
    /// # Errors
    ///
    /// Returns [`InputError::UnsupportedCaseFile`] for any extension other
    /// than `json`, `yaml`, `yml`, or `toml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(InputError::UnsupportedCaseFile(path.display().to_string()).into()),
        }
    }
}

impl CaseFile {
    /// Parses case file text in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ComputoError::Serialization`] if the text does not parse,
    /// including a start date that is not `DD/MM/YYYY`.
    pub fn parse(text: &str, format: CaseFormat) -> Result<Self> {
        let ser = |e: String| ComputoError::Serialization(e);
        match format {
            CaseFormat::Json => serde_json::from_str(text).map_err(|e| ser(e.to_string())),
            CaseFormat::Yaml => serde_yaml::from_str(text).map_err(|e| ser(e.to_string())),
            CaseFormat::Toml => toml::from_str(text).map_err(|e| ser(e.to_string())),
        }
    }

    /// Reads and parses a case file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Fails on an unsupported extension, an unreadable file, or text that
    /// does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let format = CaseFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let case = Self::parse(&text, format)?;
        debug!(path = %path.display(), causes = case.causes.len(), "loaded case file");
        Ok(case)
    }

    /// Renders the case file in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ComputoError::Serialization`] if the serializer fails.
    pub fn render(&self, format: CaseFormat) -> Result<String> {
        let ser = |e: String| ComputoError::Serialization(e);
        match format {
            CaseFormat::Json => serde_json::to_string_pretty(self).map_err(|e| ser(e.to_string())),
            CaseFormat::Yaml => serde_yaml::to_string(self).map_err(|e| ser(e.to_string())),
            CaseFormat::Toml => toml::to_string_pretty(self).map_err(|e| ser(e.to_string())),
        }
    }

    /// Builds the engine input, using `defaults` when the case carries no
    /// policy of its own.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::AdjustmentOutOfRange`] if a display adjustment
    /// is outside `-1..=1`.
    pub fn into_expedient(self, defaults: ChainConfig) -> Result<Expedient> {
        let config = self.config.unwrap_or(defaults);
        config.adjustments.validate()?;
        Ok(Expedient {
            start: self.start,
            causes: self.causes.iter().map(RawCause::to_cause).collect(),
            config,
            overrides: MinimumOverrides {
                tm: self.tm,
                tmbi: self.tmbi,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use computo_core::{ChainMode, View};
    use std::io::Write;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const YAML_CASE: &str = r#"
start: 01/01/2020
causes:
  - { years: 2, credit: 10 }
  - { months: 6, regime: "1/2" }
config:
  view: doctrinal
  chain_mode: same-day
  global_credit_days: 30
tm: 03/05/2021
"#;

    #[test]
    fn parses_yaml_case() {
        let case = CaseFile::parse(YAML_CASE, CaseFormat::Yaml).unwrap();
        assert_eq!(case.start, ymd(2020, 1, 1));
        assert_eq!(case.causes.len(), 2);
        assert_eq!(case.causes[0].credit_days, 10);
        let config = case.config.clone().unwrap();
        assert_eq!(config.view, View::Doctrinal);
        assert_eq!(config.chain_mode, ChainMode::SameDay);
        assert_eq!(case.tm, Some(ymd(2021, 5, 3)));
        assert_eq!(case.tmbi, None);

        let expedient = case.into_expedient(ChainConfig::default()).unwrap();
        assert_eq!(expedient.config, config);
        assert_eq!(expedient.causes[0], Cause::new(2, 0, 0).with_credit(10));
        assert_eq!(expedient.causes[1], Cause::new(0, 6, 0).with_regime(Regime::Half));
        assert_eq!(expedient.overrides.tm, Some(ymd(2021, 5, 3)));
    }

    #[test]
    fn parses_json_and_toml_cases() {
        let json = r#"{"start": "01/01/2020", "causes": [{"years": 1}]}"#;
        let case = CaseFile::parse(json, CaseFormat::Json).unwrap();
        assert_eq!(case.causes[0].years, 1);
        assert_eq!(case.config, None);
        let defaults = ChainConfig {
            global_credit_days: 7,
            ..ChainConfig::default()
        };
        assert_eq!(case.into_expedient(defaults.clone()).unwrap().config, defaults);

        let toml_text = "start = \"15/03/2022\"\n\n[[causes]]\ndays = 45\ncredit_days = 5\n";
        let case = CaseFile::parse(toml_text, CaseFormat::Toml).unwrap();
        assert_eq!(case.start, ymd(2022, 3, 15));
        assert_eq!(case.causes[0].days, 45);
    }

    #[test]
    fn negative_components_become_zero() {
        let json = r#"{"start": "01/01/2020", "causes": [{"years": -1, "days": 10, "credit_days": -3}]}"#;
        let expedient = CaseFile::parse(json, CaseFormat::Json)
            .unwrap()
            .into_expedient(ChainConfig::default())
            .unwrap();
        assert_eq!(expedient.causes[0], Cause::new(0, 0, 10));
    }

    #[test]
    fn bad_start_date_is_rejected() {
        let json = r#"{"start": "2020-01-01", "causes": []}"#;
        let err = CaseFile::parse(json, CaseFormat::Json).unwrap_err();
        assert!(matches!(err, ComputoError::Serialization(_)));
    }

    #[test]
    fn out_of_range_adjustment_is_rejected() {
        let json = r#"{"start": "01/01/2020", "config": {"adjustments": {"tm_days": 2}}}"#;
        let err = CaseFile::parse(json, CaseFormat::Json)
            .unwrap()
            .into_expedient(ChainConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ComputoError::Input(InputError::AdjustmentOutOfRange(2))
        ));
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("case.yml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(YAML_CASE.as_bytes())
            .unwrap();
        let case = CaseFile::load(&path).unwrap();
        assert_eq!(case.causes.len(), 2);

        let txt = dir.path().join("case.txt");
        std::fs::write(&txt, YAML_CASE).unwrap();
        assert!(matches!(
            CaseFile::load(&txt),
            Err(ComputoError::Input(InputError::UnsupportedCaseFile(_)))
        ));
    }

    #[test]
    fn rendered_case_reads_back() {
        let case = CaseFile::parse(YAML_CASE, CaseFormat::Yaml).unwrap();
        for format in [CaseFormat::Json, CaseFormat::Yaml, CaseFormat::Toml] {
            let text = case.render(format).unwrap();
            assert!(text.contains("01/01/2020"));
            assert_eq!(CaseFile::parse(&text, format).unwrap(), case);
        }
    }
}
