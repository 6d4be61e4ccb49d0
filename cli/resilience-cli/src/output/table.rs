// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Table output formatting

use comfy_table::{CellAlignment, Table, presets::NOTHING};

/// Create a borderless table; columns from `first_count_column` on hold
/// counters and are right-aligned
pub fn counter_table(headers: &[&str], first_count_column: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(headers);
    for index in first_count_column..headers.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

pub fn print_table(table: Table) {
    println!("{table}");
}
