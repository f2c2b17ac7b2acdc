use colored::Colorize;

use crate::controller::RenderModel;

pub const LOADING_MESSAGE: &str = "Loading Users";
pub const FETCH_FAILED_MESSAGE: &str =
    "Oops!. Cannot fetch data at the moment. Try refreshing the app or try again after some time.";

// consumes snapshots only; user input goes back through Actions
pub trait Renderer {
    fn render(&mut self, model: &RenderModel);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render(&mut self, model: &RenderModel) {
        print!("{}", format_model(model));
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

pub fn format_model(model: &RenderModel) -> String {
    if model.fetch_failed {
        return format!("{}\n", FETCH_FAILED_MESSAGE.bold().red());
    }
    if model.loading {
        return format!("{}\n", LOADING_MESSAGE.bold().white());
    }

    let id_w = column_width("ID", model.visible_rows.iter().map(|r| r.id.as_str()));
    let name_w = column_width("NAME", model.visible_rows.iter().map(|r| r.name.as_str()));
    let email_w = column_width("EMAIL", model.visible_rows.iter().map(|r| r.email.as_str()));
    let role_w = column_width("ROLE", model.visible_rows.iter().map(|r| r.role.as_str()));

    let mut out = String::new();
    if !model.search.is_empty() {
        out.push_str(&format!(":: search    : {}\n", model.search));
    }
    out.push_str(&format!(
        "{} {} {} {} {}\n",
        checkbox(model.all_selected),
        pad("ID", id_w).bold(),
        pad("NAME", name_w).bold(),
        pad("EMAIL", email_w).bold(),
        pad("ROLE", role_w).bold(),
    ));

    for row in model.visible_rows.iter() {
        let selected = model.selected_ids.contains(&row.id);
        let editing = model.editing_id.as_ref() == Some(&row.id);
        let line = format!(
            "{} {} {} {} {}",
            checkbox(selected),
            pad(row.id.as_str(), id_w),
            pad(&row.name, name_w),
            pad(&row.email, email_w),
            pad(&row.role, role_w),
        );
        if editing {
            out.push_str(&format!("{} {}\n", line.yellow(), "(editing)".yellow()));
        } else if selected {
            out.push_str(&format!("{}\n", line.cyan()));
        } else {
            out.push_str(&format!("{line}\n"));
        }
    }
    if model.visible_rows.is_empty() {
        out.push_str("(no users)\n");
    }

    out.push_str(&format!(
        ":: page {}/{} :: {} of {} users :: {} selected\n",
        model.current_page,
        model.total_pages,
        model.matching_records,
        model.total_records,
        model.selected_ids.len()
    ));
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .fold(header.len(), usize::max)
}
