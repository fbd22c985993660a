use std::fs::File;
use std::io::Error;
use std::path::Path;

#[allow(dead_code)]
pub fn generate_requests_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["principal", "rate", "tenure"])?;

    for i in 1..=rows {
        let principal = (i * 10_000).to_string();
        let rate = format!("{}.5", 6 + i % 10);
        let tenure = (1 + i % 30).to_string();
        wtr.write_record([principal.as_str(), rate.as_str(), tenure.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Reference EMI computed straight from the closed-form formula.
#[allow(dead_code)]
pub fn reference_emi(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> f64 {
    let r = annual_rate_percent / 100.0 / 12.0;
    let n = f64::from(tenure_years) * 12.0;
    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}
