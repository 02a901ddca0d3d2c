//! Optional Postgres mirror of the site table.
//!
//! A scrape run can be checked against, and recorded into, a `sites` table
//! so repeated runs skip stations that are already on record. The database
//! is never required; every pipeline stage works from the CSV table alone.
//!
//! Connection comes from `DATABASE_URL` (loaded via dotenv), NoTls.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE sites (
//!     site_id          TEXT PRIMARY KEY,
//!     site_name        TEXT NOT NULL,
//!     x_coordinate     DOUBLE PRECISION NOT NULL,
//!     y_coordinate     DOUBLE PRECISION NOT NULL,
//!     environment_type TEXT NOT NULL,
//!     address          TEXT,
//!     web_link         TEXT NOT NULL
//! );
//! ```

use postgres::{Client, NoTls};
use std::env;
use std::error::Error;

use crate::model::SiteRecord;

/// Connects using `DATABASE_URL` from the environment or a `.env` file.
pub fn connect() -> Result<Client, Box<dyn Error>> {
    dotenv::dotenv().ok();
    let database_url = env::var("DATABASE_URL")?;
    let client = Client::connect(&database_url, NoTls)?;
    Ok(client)
}

/// Returns whether a site is already on record.
pub fn site_recorded(client: &mut Client, site_id: &str) -> Result<bool, postgres::Error> {
    let row = client.query_one(
        "SELECT EXISTS (SELECT 1 FROM sites WHERE site_id = $1)",
        &[&site_id],
    )?;
    Ok(row.get(0))
}

/// Records every site in the table, leaving existing rows untouched.
/// Returns the number of rows inserted.
pub fn record_site_table(
    client: &mut Client,
    table: &[SiteRecord],
) -> Result<u64, postgres::Error> {
    let mut inserted = 0;
    for record in table {
        inserted += client.execute(
            "INSERT INTO sites
             (site_id, site_name, x_coordinate, y_coordinate, environment_type, address, web_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (site_id) DO NOTHING",
            &[
                &record.site_id,
                &record.site_name,
                &record.x_coordinate,
                &record.y_coordinate,
                &record.environment_type,
                &record.address,
                &record.web_link,
            ],
        )?;
    }
    Ok(inserted)
}
