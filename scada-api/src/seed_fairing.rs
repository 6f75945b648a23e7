use rocket::fairing::AdHoc;

use crate::orm::DbConn;
use crate::orm::seed::seed_if_empty;

/// Seeds the plant devices and technicians on first start.
///
/// Runs after the migration fairing. Tables that already contain rows are
/// not touched, so restarts are safe.
pub fn seed_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Plant Seed Data", |rocket| async {
        let Some(conn) = DbConn::get_one(&rocket).await else {
            error!("[seed] ERROR: Could not get DB connection.");
            return Err(rocket);
        };

        match conn.run(seed_if_empty).await {
            Ok(report) => {
                if report.devices_seeded > 0 || report.technicians_seeded > 0 {
                    info!(
                        "[seed] Seeded {} devices and {} technicians",
                        report.devices_seeded, report.technicians_seeded
                    );
                } else {
                    info!("[seed] Existing plant data found, skipping seed");
                }
                Ok(rocket)
            }
            Err(e) => {
                error!("[seed] FATAL: Seeding failed: {:?}", e);
                Err(rocket)
            }
        }
    })
}
