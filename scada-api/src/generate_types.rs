//! TypeScript type generation module.
//!
//! Exports TypeScript definitions for the API and model types annotated
//! with `#[ts(export)]` when the test suite runs.

#[cfg(test)]
mod tests {
    use std::{env, path::Path};

    use ts_rs::TS;

    #[test]
    fn generate_typescript_types() {
        // Output directory: SCADA_TS_OUTPUT_DIR if set, otherwise ../ts-bindings
        let output_dir_str =
            env::var("SCADA_TS_OUTPUT_DIR").unwrap_or_else(|_| "../ts-bindings".to_string());
        let output_dir = Path::new(&output_dir_str);

        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        }

        // Remove stale definitions so renamed types don't linger
        for entry in std::fs::read_dir(output_dir).expect("Failed to read output directory") {
            let path = entry.expect("Failed to read directory entry").path();
            if path.extension().and_then(|s| s.to_str()) == Some("ts") {
                std::fs::remove_file(&path).unwrap_or_else(|_| panic!("Failed to remove {:?}", path));
            }
        }

        unsafe {
            env::set_var("TS_RS_EXPORT_DIR", output_dir);
        }

        use crate::{
            api::{
                ErrorResponse, MutationResponse, device::ToggleRequest, status::ServiceStatus,
                technician::AssignmentRequest,
            },
            models::*,
            orm::log_query::SearchPolicy,
        };

        Device::export().expect("Failed to export Device type");
        Technician::export().expect("Failed to export Technician type");
        LogEntry::export().expect("Failed to export LogEntry type");
        LogEntryInput::export().expect("Failed to export LogEntryInput type");
        LogSearch::export().expect("Failed to export LogSearch type");
        StatusSummary::export().expect("Failed to export StatusSummary type");
        SearchPolicy::export().expect("Failed to export SearchPolicy type");

        ErrorResponse::export().expect("Failed to export ErrorResponse type");
        MutationResponse::export().expect("Failed to export MutationResponse type");
        ToggleRequest::export().expect("Failed to export ToggleRequest type");
        AssignmentRequest::export().expect("Failed to export AssignmentRequest type");
        ServiceStatus::export().expect("Failed to export ServiceStatus type");

        println!("TypeScript types generated successfully in {:?}", output_dir);
    }
}
