use anyhow::Result;
use std::io::{self, Write};

use vitalstats::db::Database;
use vitalstats::models::config::Config;

pub fn run(skip: bool) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    if !skip {
        println!("vitalstats — Initial Setup\n");

        config.profile.name = Some(prompt_string("Name")?);
        config.profile.age = Some(prompt_parsed("Age")?);
        config.profile.gender = Some(prompt_choice(
            "Gender (male/female/other)",
            &["male", "female", "other"],
        )?);
        config.profile.height_cm = Some(prompt_parsed("Height (cm)")?);
        config.profile.activity_level = Some(prompt_choice(
            "Activity level (sedentary/light/moderate/active)",
            &["sedentary", "light", "moderate", "active"],
        )?);

        config.save()?;
        Database::open(&Config::db_path())?;
        println!("\nSetup complete. Data stored in {:?}", Config::data_dir());
    } else {
        config.save()?;
        Database::open(&Config::db_path())?;
        println!("Config initialized with defaults at {:?}", Config::path());
    }

    Ok(())
}

fn prompt_string(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        anyhow::bail!("setup aborted: no input (use --skip for defaults)");
    }
    Ok(buf.trim().to_string())
}

fn prompt_parsed<T: std::str::FromStr>(label: &str) -> Result<T> {
    loop {
        let s = prompt_string(label)?;
        match s.parse::<T>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn prompt_choice(label: &str, choices: &[&str]) -> Result<String> {
    loop {
        let s = prompt_string(label)?;
        if choices.contains(&s.as_str()) {
            return Ok(s);
        }
        println!("Please enter one of: {}", choices.join(", "));
    }
}
