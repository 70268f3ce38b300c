use crate::models::Country;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save countries as CSV with header, one flattened row per country.
pub fn save_csv<P: AsRef<Path>>(countries: &[Country], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "cca3",
        "name",
        "official_name",
        "region",
        "subregion",
        "population",
        "area",
        "capital",
        "languages",
        "currencies",
        "borders",
    ))?;
    for c in countries {
        wtr.serialize((
            &c.cca3,
            c.display_name(),
            &c.name.official,
            c.region.as_str(),
            &c.subregion,
            c.population,
            c.area,
            c.capitals_joined(),
            c.languages_joined(),
            c.currencies_joined(),
            c.borders.as_ref().map(|b| b.join(", ")),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save countries as a pretty JSON array in the API's field shape.
pub fn save_json<P: AsRef<Path>>(countries: &[Country], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(countries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
