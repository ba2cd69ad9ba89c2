use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::mask::Mask;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaskOptions {
    /// Match placeholder letter classes without folding case.
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub mask: Option<String>,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl FieldConfig {
    pub fn options(&self) -> MaskOptions {
        MaskOptions {
            case_sensitive: self.case_sensitive,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }

    /// An explicit mask wins over a preset.
    pub fn resolve_mask(&self) -> Result<Mask> {
        if let Some(mask) = &self.mask {
            return Ok(Mask::new(mask.as_str()));
        }
        let Some(name) = &self.preset else {
            return Err(Error::MissingMask {
                id: self.id.clone(),
            });
        };
        resolve_preset(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl Config {
    /// Loads a config file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(text.as_str())?
        } else {
            Self::from_yaml_str(text.as_str())?
        };
        log::debug!("loaded {} field(s) from {:?}", config.fields.len(), path);
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

pub fn resolve_preset(name: &str) -> Result<Mask> {
    Mask::preset(name).ok_or_else(|| Error::UnknownPreset {
        name: name.to_string(),
        known: Mask::preset_names().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::{Config, MaskOptions};
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn yaml_fields_resolve_masks_and_presets() {
        let config = Config::from_yaml_str(
            r#"
fields:
  - id: phone
    label: Phone
    preset: phone_us
  - id: code
    mask: "AAA-999"
    case_sensitive: true
"#,
        )
        .expect("config should parse");

        assert_eq!(config.fields.len(), 2);
        let phone = &config.fields[0];
        assert_eq!(phone.label(), "Phone");
        assert_eq!(
            phone.resolve_mask().expect("preset").definition(),
            "(999) 999-9999"
        );
        assert_eq!(phone.options(), MaskOptions::default());

        let code = &config.fields[1];
        assert_eq!(code.label(), "code");
        assert!(code.options().case_sensitive);
        assert_eq!(code.resolve_mask().expect("mask").definition(), "AAA-999");
    }

    #[test]
    fn json_config_is_accepted() {
        let config = Config::from_json_str(r#"{"fields":[{"id":"zip","preset":"zip_us"}]}"#)
            .expect("json config");
        assert_eq!(config.fields[0].id, "zip");
    }

    #[test]
    fn unknown_preset_lists_known_names() {
        let config = Config::from_yaml_str("fields:\n  - id: x\n    preset: iban\n").expect("config");
        match config.fields[0].resolve_mask() {
            Err(Error::UnknownPreset { name, known }) => {
                assert_eq!(name, "iban");
                assert!(known.contains(&"cpf".to_string()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn field_without_mask_is_rejected() {
        let config = Config::from_yaml_str("fields:\n  - id: x\n").expect("config");
        assert!(matches!(
            config.fields[0].resolve_mask(),
            Err(Error::MissingMask { .. })
        ));
    }

    #[test]
    fn options_default_to_case_insensitive() {
        let options: MaskOptions = serde_json::from_str("{}").expect("options");
        assert!(!options.case_sensitive);
        assert!(serde_json::from_str::<MaskOptions>(r#"{"case":true}"#).is_err());
    }

    #[test]
    fn load_picks_format_by_extension() {
        let temp_dir = TempDir::new().expect("temp dir");

        let json_path = temp_dir.path().join("fields.JSON");
        fs::write(&json_path, r#"{"fields":[{"id":"zip","preset":"zip_us"}]}"#)
            .expect("write json");
        let config = Config::load(&json_path).expect("json config");
        assert_eq!(config.fields[0].id, "zip");

        let yaml_path = temp_dir.path().join("fields.yaml");
        fs::write(&yaml_path, "fields:\n  - id: code\n    mask: \"AA-99\"\n").expect("write yaml");
        let config = Config::load(&yaml_path).expect("yaml config");
        assert_eq!(config.fields[0].mask.as_deref(), Some("AA-99"));

        // YAML text behind a .json name goes through the JSON parser.
        let mislabeled = temp_dir.path().join("mislabeled.json");
        fs::write(&mislabeled, "fields: []\n").expect("write mislabeled");
        assert!(matches!(Config::load(&mislabeled), Err(Error::Json(_))));
    }

    #[test]
    fn load_reports_unreadable_path() {
        let temp_dir = TempDir::new().expect("temp dir");
        let missing = temp_dir.path().join("missing.yaml");
        match Config::load(&missing) {
            Err(Error::ConfigRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
