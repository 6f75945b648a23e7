use std::thread;

use diesel::prelude::*;
use scada_api::{
    models::MAINTENANCE_START,
    orm::{
        device::{get_device_by_id, set_maintenance},
        establish_connection,
        log_entry::get_device_history,
        seed::seed_if_empty,
        testing::unique_test_db_path,
    },
};

/// A reader inside a transaction must never see the maintenance flag out of
/// step with the newest log entry for the device.
#[test]
fn test_readers_never_see_state_without_log() {
    let url = unique_test_db_path().to_string_lossy().to_string();
    let mut setup = establish_connection(&url).expect("Failed to open test database");
    seed_if_empty(&mut setup).expect("Failed to seed test database");

    let writer_url = url.clone();
    let writer = thread::spawn(move || {
        let mut conn = establish_connection(&writer_url).expect("writer connection");
        for n in 0..200 {
            set_maintenance(&mut conn, 1, n % 2 == 0).expect("maintenance toggle");
        }
    });

    let mut reader = establish_connection(&url).expect("reader connection");
    let mut checks = 0;
    while !writer.is_finished() || checks == 0 {
        reader
            .transaction(|conn| {
                let device = get_device_by_id(conn, 1)?.expect("seeded device");
                let history = get_device_history(conn, 1)?;
                match history.last() {
                    None => assert!(!device.maintenance_mode),
                    Some(last) => assert_eq!(device.maintenance_mode, last.type_ == MAINTENANCE_START),
                }
                Ok::<_, diesel::result::Error>(())
            })
            .expect("read transaction");
        checks += 1;
    }
    writer.join().expect("writer thread panicked");

    let history = get_device_history(&mut reader, 1).unwrap();
    assert_eq!(history.len(), 200);
    assert!(!get_device_by_id(&mut reader, 1).unwrap().unwrap().maintenance_mode);
}
