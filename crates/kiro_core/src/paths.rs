use std::path::PathBuf;

/// Converter config directory (~/.kiro-converter)
pub fn converter_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".kiro-converter")
}

/// Path of config.json inside the converter directory
pub fn config_json_path() -> PathBuf {
    converter_dir().join("config.json")
}
