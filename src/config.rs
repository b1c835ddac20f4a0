/*
 * Duesboard, resident dues at a glance
 * Copyright (C) 2019-2020 Adrien 'Litarvan' Navratil
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
use std::fs;
use std::path::Path;
use std::process::exit;

use log::{info, warn, error};
use lazy_static::lazy_static;
use serde_derive::{Serialize, Deserialize};

use crate::sheet::columns::ColumnMap;

lazy_static! {
    pub static ref CONFIG: BoardConfig = load();
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct BoardConfig {
    pub sheet_base_url: String,
    pub sheet_id: String,

    pub contact_url: String,
    pub payment_asset: String,

    #[serde(default)]
    pub columns: ColumnMap
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            sheet_base_url: "https://docs.google.com/spreadsheets/d".to_string(),
            sheet_id: "15Hzg5ajtqTSdxkM9JwwSqkrRrSPjTWMKsPI3a5OT6ao".to_string(),

            contact_url: "https://call.whatsapp.com/voice/LRzVgDOCq7WXWvoKDr7Wsq".to_string(),
            payment_asset: "qr-code.png".to_string(),

            columns: ColumnMap::SHEET
        }
    }
}

fn load() -> BoardConfig {
    let config_path = match std::env::var("DUESBOARD_CONFIG") {
        Ok(c) => c,
        Err(_) => "./duesboard.toml".to_string()
    };

    if !Path::new(&config_path).exists() {
        warn!("Configuration file at '{}' does not exist, creating a default one", config_path);

        let config = BoardConfig::default();
        match toml::to_string(&config) {
            Ok(str) => if let Err(e) = fs::write(&config_path, str) {
                error!("Failed writing default config at '{}', please check if the parent folder exists \
                and if the program has the permission to write in there: {}", config_path, e);
            },
            Err(e) => error!("Failed serializing default config, this is very bad, please contact the devs: {}", e)
        }

        // Defaults point to the published sheet, no need to stop here
        return config;
    }

    info!("Reading config from '{}'", config_path);

    match fs::read_to_string(config_path) {
        Ok(s) => match parse(&s) {
            Ok(c) => c,
            Err(e) => {
                error!("Error while deserializing the config file, there is probably a syntax error in it: {}", e);
                exit(1);
            }
        },
        Err(e) => {
            error!("Error while reading the config file, the program may not have the permissions to read it: {}", e);
            exit(1);
        }
    }
}

fn parse(content: &str) -> Result<BoardConfig, toml::de::Error> {
    toml::from_str::<BoardConfig>(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let written = toml::to_string(&BoardConfig::default()).unwrap();

        assert!(written.contains("[columns]"));
        assert_eq!(parse(&written).unwrap(), BoardConfig::default());
    }

    #[test]
    fn columns_table_is_optional() {
        let config = parse(r#"
            sheet_base_url = "http://localhost:8080/d"
            sheet_id = "test"
            contact_url = "https://example.org/call"
            payment_asset = "/srv/qr.png"
        "#).unwrap();

        assert_eq!(config.sheet_id, "test");
        assert_eq!(config.columns, ColumnMap::SHEET);
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(parse("sheet_id = \"test\"").is_err());
    }
}
