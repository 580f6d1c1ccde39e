use crate::error::AppError;
use crate::model::Task;
use std::fmt;
use std::str::FromStr;

/// Which subset of the task list is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::All => Self::Completed,
            Self::Active => Self::All,
            Self::Completed => Self::Active,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            other => Err(AppError::invalid_input(format!(
                "unknown filter '{other}' (expected all, active or completed)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Filter;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(" Active ".parse::<Filter>().unwrap(), Filter::Active);
        assert_eq!("COMPLETED".parse::<Filter>().unwrap(), Filter::Completed);
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "pending".parse::<Filter>().unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn next_and_previous_cycle_through_every_filter() {
        for filter in Filter::ALL {
            assert_eq!(filter.next().previous(), filter);
        }
        assert_eq!(Filter::Completed.next(), Filter::All);
    }

    #[test]
    fn default_is_all() {
        assert_eq!(Filter::default(), Filter::All);
    }
}
