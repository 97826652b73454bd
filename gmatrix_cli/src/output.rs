use clap::ValueEnum;
use comfy_table::Table;
use gmatrix_client::matrix_response::{Element, ElementStatus, MatrixResponse};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// The decoded response as JSON
    Json,
    /// Flat row-major distance and time matrices as JSON
    Matrix,
    Table,
}

pub fn print_response(response: &MatrixResponse, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Matrix => println!(
            "{}",
            serde_json::to_string_pretty(&response.travel_matrices())?
        ),
        OutputFormat::Table => println!("{}", response_table(response)),
    }

    Ok(())
}

fn response_table(response: &MatrixResponse) -> Table {
    let mut table = Table::new();

    let mut header = vec![String::new()];
    header.extend(response.destination_addresses.iter().cloned());
    table.set_header(header);

    for (origin, row) in response.origin_addresses.iter().zip(&response.rows) {
        let mut cells = vec![origin.clone()];
        cells.extend(row.elements.iter().map(element_cell));
        table.add_row(cells);
    }

    table
}

fn element_cell(element: &Element) -> String {
    match (element.status, &element.distance, &element.duration) {
        (ElementStatus::Ok, Some(distance), Some(duration)) => {
            format!("{} / {}", distance.text, duration.text)
        }
        (status, _, _) => format!("{status:?}"),
    }
}
