use std::fmt;

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Amount,
    Owner,
}

impl SortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(SortField::Id),
            "amount" => Some(SortField::Amount),
            "owner" => Some(SortField::Owner),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Amount => "amount",
            SortField::Owner => "owner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.column(), self.direction.keyword())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("Invalid value for '{param}': {value}")]
    InvalidNumber { param: &'static str, value: String },

    #[error("Unknown sort property: {0}")]
    UnknownSortField(String),
}

/// A zero-based page of a listing with its ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    /// Parses `page`, `size` and any number of `sort` parameters from a raw
    /// query string.
    ///
    /// Supported sort forms:
    /// - `sort=amount` (ascending)
    /// - `sort=amount,desc`
    /// - `sort=owner,amount,desc` (direction applies to every listed field)
    pub fn from_query(
        query: Option<&str>,
        default_size: u32,
        max_size: u32,
    ) -> Result<Self, PageRequestError> {
        let mut page = 0;
        let mut size = default_size;
        let mut sort = Vec::new();

        let pairs = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).collect::<Vec<_>>())
            .unwrap_or_default();

        for (key, value) in pairs {
            let value = value.trim();
            match &*key {
                "page" if !value.is_empty() => {
                    let parsed = parse_number("page", value)?;
                    page = parsed.clamp(0, u32::MAX as i64) as u32;
                }
                "size" if !value.is_empty() => {
                    let parsed = parse_number("size", value)?;
                    size = if parsed < 1 {
                        default_size
                    } else {
                        parsed.min(max_size as i64) as u32
                    };
                }
                "sort" => sort.extend(parse_sort(value)?),
                _ => {}
            }
        }

        Ok(Self { page, size, sort })
    }

    /// Uses `default` as the ordering when the request named none.
    pub fn sort_or(mut self, default: SortOrder) -> Self {
        if self.sort.is_empty() {
            self.sort.push(default);
        }
        self
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }

    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    /// Renders the ORDER BY clause. Columns come from [`SortField`] only; a
    /// trailing `id ASC` keeps rows with equal keys in a stable order.
    pub fn order_by_clause(&self) -> String {
        let mut terms: Vec<String> = self.sort.iter().map(ToString::to_string).collect();

        if !self.sort.iter().any(|order| order.field == SortField::Id) {
            terms.push(SortOrder::asc(SortField::Id).to_string());
        }

        terms.join(", ")
    }
}

fn parse_number(param: &'static str, value: &str) -> Result<i64, PageRequestError> {
    value
        .parse::<i64>()
        .map_err(|_| PageRequestError::InvalidNumber {
            param,
            value: value.to_string(),
        })
}

fn parse_sort(value: &str) -> Result<Vec<SortOrder>, PageRequestError> {
    let mut tokens: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let direction = match tokens.last().and_then(|t| Direction::parse(t)) {
        Some(direction) => {
            tokens.pop();
            direction
        }
        None => Direction::Asc,
    };

    tokens
        .into_iter()
        .map(|name| {
            SortField::parse(name)
                .map(|field| SortOrder { field, direction })
                .ok_or_else(|| PageRequestError::UnknownSortField(name.to_string()))
        })
        .collect()
}
