use comfy_table::presets::ASCII_FULL;
use comfy_table::{ContentArrangement, Table, TableComponent};

/// Render rows as a bordered ASCII table with a separator under the header only.
pub fn render_ascii_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_style(TableComponent::HeaderLines, '-')
        .set_style(TableComponent::LeftHeaderIntersection, '+')
        .set_style(TableComponent::MiddleHeaderIntersections, '+')
        .set_style(TableComponent::RightHeaderIntersection, '+')
        .remove_style(TableComponent::HorizontalLines)
        .remove_style(TableComponent::MiddleIntersections)
        .remove_style(TableComponent::LeftBorderIntersections)
        .remove_style(TableComponent::RightBorderIntersections)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header.to_vec());
    for row in rows {
        table.add_row(row.clone());
    }
    table.to_string()
}
