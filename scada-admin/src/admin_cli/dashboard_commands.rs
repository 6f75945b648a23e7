use diesel::sqlite::SqliteConnection;
use scada_api::orm::dashboard::summary;

pub fn handle_dashboard_command(
    conn: &mut SqliteConnection,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = summary(conn)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Assets online:  {}", status.assets_online);
        println!("Assets offline: {}", status.assets_offline);
        println!("Open tickets:   {}", status.open_tickets);
    }
    Ok(())
}
