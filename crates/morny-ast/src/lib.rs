pub mod span {
    use serde::Serialize;
    use std::fmt;

    /// A point in the source text. Line and column are 1-based, the index is
    /// a 0-based byte offset.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
    pub struct Pos {
        pub line: usize,
        pub column: usize,
        pub index: usize,
    }

    impl Pos {
        pub const START: Pos = Pos {
            line: 1,
            column: 1,
            index: 0,
        };
    }

    impl Default for Pos {
        fn default() -> Self {
            Pos::START
        }
    }

    impl fmt::Display for Pos {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}:{}", self.line, self.column)
        }
    }

    /// Half-open range `[start, end)` of source text.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
    pub struct Span {
        pub start: Pos,
        pub end: Pos,
    }

    impl Span {
        pub fn new(start: Pos, end: Pos) -> Self {
            Self { start, end }
        }

        /// Length in bytes.
        pub fn len(&self) -> usize {
            self.end.index - self.start.index
        }

        pub fn is_empty(&self) -> bool {
            self.start.index == self.end.index
        }
    }
}

pub mod ast {
    use serde::Serialize;
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Expr {
        Null,
        Integer(i64),
        Double(f64),
        /// Not built by the parser: float literals widen into `Double`.
        Float(f32),
        Identifier(String),
        String(String),
        /// Bracketed lists, operand chains and statement groups.
        Sequence(Vec<Expr>),
        /// Reserved; no grammar rule builds it yet.
        Lambda,
    }

    impl Expr {
        pub fn sequence(items: Vec<Expr>) -> Self {
            Expr::Sequence(items)
        }

        pub fn is_null(&self) -> bool {
            matches!(self, Expr::Null)
        }

        pub fn as_sequence(&self) -> Option<&[Expr]> {
            match self {
                Expr::Sequence(items) => Some(items),
                _ => None,
            }
        }
    }

    // Debug dump, e.g. `[Integer:3, Identifier:x]`. Not meant to be re-parsed.
    impl fmt::Display for Expr {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Expr::Null => write!(f, "Null"),
                Expr::Integer(v) => write!(f, "Integer:{}", v),
                Expr::Double(v) => write!(f, "Double:{}", v),
                Expr::Float(v) => write!(f, "Float:{}", v),
                Expr::Identifier(s) => write!(f, "Identifier:{}", s),
                Expr::String(s) => write!(f, "String:{}", s),
                Expr::Lambda => write!(f, "Lambda"),
                Expr::Sequence(items) => {
                    write!(f, "[")?;
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", item)?;
                    }
                    write!(f, "]")
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Expr;

        #[test]
        fn dump_nested_sequence() {
            let e = Expr::sequence(vec![
                Expr::Integer(3),
                Expr::sequence(vec![Expr::Identifier("x".into()), Expr::Float(34.0)]),
                Expr::sequence(vec![]),
            ]);
            assert_eq!(e.to_string(), "[Integer:3, [Identifier:x, Float:34], []]");
        }

        #[test]
        fn dump_scalars() {
            assert_eq!(Expr::Null.to_string(), "Null");
            assert_eq!(Expr::Double(3.5346).to_string(), "Double:3.5346");
            assert_eq!(Expr::String("hi".into()).to_string(), "String:hi");
            assert_eq!(Expr::Lambda.to_string(), "Lambda");
        }
    }
}
