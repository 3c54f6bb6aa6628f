use std::cmp::Ordering;

use tracegrid_types::{Run, RunUser};

use super::{ColumnMeta, ColumnSpec};
use crate::cell::Cell;
use crate::context::RenderContext;

#[derive(Debug, Clone)]
pub struct UserColumn {
    meta: ColumnMeta,
}

/// Avatar and name of the end user; fixed width
pub fn user_column() -> UserColumn {
    UserColumn {
        meta: ColumnMeta::new("user", "User").size(120),
    }
}

impl ColumnSpec for UserColumn {
    type Value = Option<RunUser>;

    fn meta(&self) -> &ColumnMeta {
        &self.meta
    }

    fn value(&self, run: &Run) -> Self::Value {
        run.user.clone().filter(|user| user.id.is_some())
    }

    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Option<Ordering> {
        let name = |user: &Self::Value| {
            user.as_ref()
                .and_then(RunUser::display_name)
                .map(str::to_lowercase)
        };
        Some(name(a).cmp(&name(b)))
    }

    fn render(&self, value: &Self::Value, _run: &Run, ctx: &RenderContext) -> Cell {
        let Some(user) = value else {
            return Cell::Empty;
        };
        let Some(id) = user.id.as_deref() else {
            return Cell::Empty;
        };

        let name = user.display_name().unwrap_or(id).to_string();
        Cell::Avatar {
            initials: initials(&name),
            color: ctx.palette.color_from_seed(id),
            name,
        }
    }
}

/// Up to two uppercase initials from the words of a name
fn initials(name: &str) -> String {
    let words: Vec<&str> = name
        .split(|c: char| c.is_whitespace() || c == '.' || c == '@' || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
        .collect();

    let picked: String = match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };
    picked.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Column;
    use crate::columns::test_support::{ctx, run};
    use crate::palette::{HashPalette, Palette};
    use serde_json::json;

    #[test]
    fn test_user_avatar() {
        let mut row = run("r1");
        row.user = Some(RunUser {
            id: Some("u_1".to_string()),
            external_id: None,
            props: json!({ "name": "Ada Lovelace" }).as_object().cloned(),
        });

        assert_eq!(
            user_column().cell(&row, &ctx()),
            Cell::Avatar {
                initials: "AL".to_string(),
                name: "Ada Lovelace".to_string(),
                color: HashPalette.color_from_seed("u_1"),
            }
        );
    }

    #[test]
    fn test_user_without_id_renders_nothing() {
        let mut row = run("r1");
        assert_eq!(user_column().cell(&row, &ctx()), Cell::Empty);

        row.user = Some(RunUser {
            external_id: Some("ext".to_string()),
            ..Default::default()
        });
        assert_eq!(user_column().cell(&row, &ctx()), Cell::Empty);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("grace"), "GR");
        assert_eq!(initials("john.q.public@example.com"), "JC");
        assert_eq!(initials(""), "");
    }
}
