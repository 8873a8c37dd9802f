//! 연차별 결과를 CSV로 내보낸다.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use thiserror::Error;

use crate::lifecycle::LifecycleResult;

/// CSV 내보내기 오류.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV 쓰기 오류: {0}")]
    Csv(#[from] csv::Error),
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
}

/// `Year,Cost,System` 형식으로 연차별 운전비를 쓴다. 행 순서는 입력 순서 그대로다.
pub fn write_yearly_costs_csv<W: Write>(
    writer: W,
    series: &[(&str, &LifecycleResult)],
) -> Result<(), ExportError> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(["Year", "Cost", "System"])?;
    for (system, result) in series {
        for entry in &result.yearly_costs {
            csv.write_record([entry.year.to_string(), entry.cost.to_string(), system.to_string()])?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// `Year,CO2 Emission,System` 형식으로 연차별 배출량을 쓴다.
pub fn write_yearly_emissions_csv<W: Write>(
    writer: W,
    series: &[(&str, &LifecycleResult)],
) -> Result<(), ExportError> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(["Year", "CO2 Emission", "System"])?;
    for (system, result) in series {
        for entry in &result.yearly_emissions {
            csv.write_record([
                entry.year.to_string(),
                entry.emissions.to_string(),
                system.to_string(),
            ])?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// 운전비 CSV를 파일로 저장한다.
pub fn save_yearly_costs(path: &Path, series: &[(&str, &LifecycleResult)]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_yearly_costs_csv(file, series)?;
    tracing::info!(path = %path.display(), rows = series.len(), "exported yearly costs");
    Ok(())
}

/// 배출량 CSV를 파일로 저장한다.
pub fn save_yearly_emissions(
    path: &Path,
    series: &[(&str, &LifecycleResult)],
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_yearly_emissions_csv(file, series)?;
    tracing::info!(path = %path.display(), rows = series.len(), "exported yearly emissions");
    Ok(())
}
