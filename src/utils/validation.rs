use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let url = Url::parse(url_str).map_err(|e| EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Unsupported URL scheme: {}", scheme),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 檔名必須是單一路徑元件，不能跳出輸出目錄
pub fn validate_file_name(field_name: &str, file_name: &str) -> Result<()> {
    validate_path(field_name, file_name)?;

    let path = std::path::Path::new(file_name);
    if path.is_absolute() || path.components().count() != 1 || file_name == ".." {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file_name.to_string(),
            reason: "Must be a plain file name inside the output directory".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
