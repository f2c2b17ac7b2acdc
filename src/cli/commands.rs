use crate::controller::Action;
use crate::model::{Field, RecordId};
use crate::output::OutputFormat;
use crate::utils::{parse_page_number, split_first_word};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Apply(Action),
    Show,
    Export {
        path: String,
        format: Option<OutputFormat>,
    },
    Help,
    Quit,
}

pub const COMMAND_HELP: &str = "Commands:
  search <text>            filter by name, email or role (empty clears)
  clear-search             drop the filter
  page <n> | first | prev | next | last
  toggle <id>              check or uncheck a row on this page
  all                      check or uncheck every row on this page
  delete <id>              delete one user
  delete-selected          delete every checked user
  edit <id>                start editing a row
  set <id> <field> <value> change a field of a row
  save <id>                validate and finish editing
  show                     print the current page
  export <file> [format]   write the active view (text, json or xml)
  help | quit
";

fn required_id(rest: &str, command: &str) -> Result<RecordId, String> {
    let (id, extra) = split_first_word(rest);
    if id.is_empty() {
        return Err(format!("usage: {command} <id>"));
    }
    if !extra.is_empty() {
        return Err(format!("unexpected input after id: '{extra}'"));
    }
    Ok(RecordId::from(id))
}

fn no_args(rest: &str, command: Command) -> Result<Command, String> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(format!("unexpected input: '{rest}'"))
    }
}

/// Blank lines and `#` comments parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, raw_rest) = split_first_word(line);
    if word.is_empty() || word.starts_with('#') {
        return Ok(None);
    }
    let rest = raw_rest.trim_end();

    let command = match word.to_lowercase().as_str() {
        // the token is matched as typed, trailing spaces included
        "search" => Command::Apply(Action::SearchChanged(raw_rest.to_string())),
        "clear-search" => no_args(rest, Command::Apply(Action::SearchChanged(String::new())))?,
        "page" => Command::Apply(Action::GoToPage(parse_page_number(rest)?)),
        "first" => no_args(rest, Command::Apply(Action::FirstPage))?,
        "prev" | "previous" => no_args(rest, Command::Apply(Action::PreviousPage))?,
        "next" => no_args(rest, Command::Apply(Action::NextPage))?,
        "last" => no_args(rest, Command::Apply(Action::LastPage))?,
        "toggle" => Command::Apply(Action::RowToggled(required_id(rest, "toggle")?)),
        "all" => no_args(rest, Command::Apply(Action::SelectAllToggled))?,
        "delete" => Command::Apply(Action::DeleteOne(required_id(rest, "delete")?)),
        "delete-selected" => no_args(rest, Command::Apply(Action::DeleteSelected))?,
        "edit" => Command::Apply(Action::EditRequested(required_id(rest, "edit")?)),
        "save" => Command::Apply(Action::SaveRequested(required_id(rest, "save")?)),
        "set" => {
            let (id, rest) = split_first_word(rest);
            let (field, value) = split_first_word(rest);
            if id.is_empty() || field.is_empty() {
                return Err("usage: set <id> <field> <value>".to_string());
            }
            let field =
                Field::parse(field).ok_or_else(|| format!("field '{field}' cannot be edited"))?;
            Command::Apply(Action::FieldEdited {
                id: RecordId::from(id),
                field,
                value: value.to_string(),
            })
        }
        "show" => no_args(rest, Command::Show)?,
        "export" => {
            let (path, format) = split_first_word(rest);
            if path.is_empty() {
                return Err("usage: export <file> [format]".to_string());
            }
            let format = if format.is_empty() {
                None
            } else {
                Some(
                    OutputFormat::parse(format)
                        .ok_or_else(|| format!("unknown export format '{format}'"))?,
                )
            };
            Command::Export {
                path: path.to_string(),
                format,
            }
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}
