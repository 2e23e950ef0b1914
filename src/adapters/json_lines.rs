use crate::domain::model::{Dataset, ProcessedRow};
use crate::utils::error::{EtlError, Result};
use std::io::Write;

/// 每列一個 JSON 物件，以 `\n` 結尾
pub fn render(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for row in dataset.rows() {
        serde_json::to_writer(&mut buffer, row)?;
        buffer.write_all(b"\n")?;
    }
    Ok(buffer)
}

pub fn parse(data: &[u8]) -> Result<Vec<ProcessedRow>> {
    serde_json::Deserializer::from_slice(data)
        .into_iter::<ProcessedRow>()
        .map(|row| row.map_err(EtlError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::fingerprint;

    fn sample() -> Dataset {
        Dataset::from(vec![
            ProcessedRow {
                region: "Europe".to_string(),
                city_name: "France".to_string(),
                language_hash: fingerprint("French"),
                processing_time: "100.12 ms".to_string(),
            },
            ProcessedRow {
                region: "N/A".to_string(),
                city_name: "N/A".to_string(),
                language_hash: fingerprint("N/A"),
                processing_time: "100.00 ms".to_string(),
            },
        ])
    }

    #[test]
    fn test_render_one_object_per_line() {
        let output = String::from_utf8(render(&sample()).unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(output.ends_with('\n'));
        assert_eq!(
            lines[0],
            format!(
                r#"{{"Región":"Europe","City Name":"France","Language":"{}","Time":"100.12 ms"}}"#,
                fingerprint("French")
            )
        );
    }

    #[test]
    fn test_render_empty_dataset_is_empty_file() {
        assert!(render(&Dataset::new()).unwrap().is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let dataset = sample();
        assert_eq!(render(&dataset).unwrap(), render(&dataset).unwrap());
    }

    #[test]
    fn test_parse_reads_rendered_rows() {
        let dataset = sample();
        let parsed = parse(&render(&dataset).unwrap()).unwrap();
        assert_eq!(parsed, dataset.rows());
    }
}
