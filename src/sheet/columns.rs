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
use serde_derive::{Serialize, Deserialize};

/// Position of each user field among the cells of a directory row.
///
/// Column 4 of the published sheet holds nothing we display, hence the gap
/// in the default mapping.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub flat_number: usize,
    pub display_name: usize,
    pub username: usize,
    pub outstanding_amount: usize,
    pub total_outstanding_amount: usize,
    pub password: usize
}

impl ColumnMap {
    pub const SHEET: ColumnMap = ColumnMap {
        flat_number: 0,
        display_name: 1,
        username: 2,
        outstanding_amount: 3,
        total_outstanding_amount: 5,
        password: 6
    };
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap::SHEET
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnMap;

    #[test]
    fn sheet_mapping_skips_column_four() {
        let map = ColumnMap::default();

        assert_eq!(map.flat_number, 0);
        assert_eq!(map.display_name, 1);
        assert_eq!(map.username, 2);
        assert_eq!(map.outstanding_amount, 3);
        assert_eq!(map.total_outstanding_amount, 5);
        assert_eq!(map.password, 6);

        let used = [
            map.flat_number,
            map.display_name,
            map.username,
            map.outstanding_amount,
            map.total_outstanding_amount,
            map.password
        ];
        assert!(!used.contains(&4));
    }

    #[test]
    fn partial_toml_table_is_rejected() {
        // Every column must be named, a half-written override is a config error
        let parsed = toml::from_str::<ColumnMap>("flat_number = 1");
        assert!(parsed.is_err());
    }
}
