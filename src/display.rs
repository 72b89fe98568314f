use chrono::{DateTime, Utc};
use console::style;

use swapi_client::{Entity, PageResponse, Person, Planet};

const PLACEHOLDER: &str = "-";

pub struct Table {
    pub header: String,
    pub rows: Vec<String>,
}

impl Table {
    fn new(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        Self {
            header: pad_row(&header_cells, &widths),
            rows: rows.iter().map(|r| pad_row(r, &widths)).collect(),
        }
    }

    pub fn print(&self) {
        println!("{}", style(&self.header).bold());
        if self.rows.is_empty() {
            println!("  (no results)");
        }
        for row in &self.rows {
            println!("{}", row);
        }
    }
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn entity_cells<E: Entity>(entity: &E) -> [String; 2] {
    [
        entity.name().unwrap_or(PLACEHOLDER).to_string(),
        entity
            .created()
            .map(format_created)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    ]
}

pub fn format_created(created: DateTime<Utc>) -> String {
    created.format("%Y-%m-%d").to_string()
}

pub fn people_table(page: &PageResponse<Person>) -> Table {
    let rows = page
        .content
        .iter()
        .map(|p| {
            let [name, created] = entity_cells(p);
            vec![
                name,
                cell(&p.gender),
                cell(&p.birth_year),
                cell(&p.height),
                cell(&p.mass),
                created,
            ]
        })
        .collect();
    Table::new(
        &["NAME", "GENDER", "BIRTH YEAR", "HEIGHT", "MASS", "CREATED"],
        rows,
    )
}

pub fn planets_table(page: &PageResponse<Planet>) -> Table {
    let rows = page
        .content
        .iter()
        .map(|p| {
            let [name, created] = entity_cells(p);
            vec![
                name,
                cell(&p.climate),
                cell(&p.terrain),
                cell(&p.diameter),
                cell(&p.gravity),
                created,
            ]
        })
        .collect();
    Table::new(
        &["NAME", "CLIMATE", "TERRAIN", "DIAMETER", "GRAVITY", "CREATED"],
        rows,
    )
}

pub fn format_page_footer<T>(page: &PageResponse<T>) -> String {
    let mut line = format!(
        "page {} of {} ({} total",
        page.page, page.total_pages, page.total_elements
    );
    if let (Some(sort), Some(dir)) = (&page.sort, &page.direction) {
        line.push_str(&format!(", sorted by {} {}", sort, dir));
    }
    if let Some(search) = page.search.as_deref().filter(|s| !s.is_empty()) {
        line.push_str(&format!(", matching '{}'", search));
    }
    line.push(')');
    line
}
