use super::bind::BindValue;
use super::parts::SqlPart;
use super::plan::QueryPlan;

/// Something that knows how to write itself (text and binds) into a [`Sql`].
pub trait SqlFragment {
    /// Append this fragment, binding any values through `sql`.
    fn append_to_sql(&self, sql: &mut Sql);
}

/// A parameter-safe dynamic SQL builder.
///
/// `Sql` stores SQL pieces and parameters separately and generates `$1, $2, ...`
/// placeholders in the final SQL string, so placeholder numbering can never
/// drift from the parameter list.
#[must_use]
#[derive(Debug, Clone)]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<BindValue>,
    tag: Option<String>,
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            params: Vec::new(),
            tag: None,
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self {
            parts: Vec::new(),
            params: Vec::new(),
            tag: None,
        }
    }

    /// Associate a tag for observability (consuming).
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<BindValue>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value.into());
        self
    }

    /// Append a fragment.
    pub fn push_fragment(&mut self, fragment: &impl SqlFragment) -> &mut Self {
        fragment.append_to_sql(self);
        self
    }

    /// Append `WHERE f1 AND f2 ...`.
    ///
    /// If `fragments` is empty, this is a no-op: no `WHERE` keyword is written.
    pub fn push_where_and<F: SqlFragment>(&mut self, fragments: &[F]) -> &mut Self {
        for (i, fragment) in fragments.iter().enumerate() {
            self.push(if i == 0 { " WHERE " } else { " AND " });
            self.push_fragment(fragment);
        }
        self
    }

    /// Append `LIMIT $n` with a bound parameter.
    pub fn limit(&mut self, n: i64) -> &mut Self {
        self.push(" LIMIT ").push_bind(n)
    }

    /// Number of parameters bound so far.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let cap = self
            .parts
            .iter()
            .map(|p| match p {
                SqlPart::Raw(s) => s.len(),
                SqlPart::Param => 3,
            })
            .sum();

        let mut out = String::with_capacity(cap);
        let mut idx: usize = 0;
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    out.push('$');
                    out.push_str(&idx.to_string());
                }
            }
        }
        out
    }

    /// Finish the statement.
    pub fn into_plan(self) -> QueryPlan {
        let sql = self.to_sql();
        let plan = QueryPlan::new(sql, self.params);
        match self.tag {
            Some(tag) => plan.tagged(tag),
            None => plan,
        }
    }
}
