use std::path::Path;

pub fn run(file: Option<&Path>) -> Result<(), String> {
    let tuning = super::load_tuning(file)?;
    let text = tuning.to_toml_string().map_err(|e| e.to_string())?;
    print!("{text}");
    Ok(())
}
