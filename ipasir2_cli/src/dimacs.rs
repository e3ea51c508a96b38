/*!
A reader for formulas in the DIMACS CNF format.

A formula begins with a problem line `p cnf <atoms> <clauses>`, followed by clauses.
Each clause is a sequence of non-zero literals terminated by `0`, and a clause may span lines (or share a line with other clauses).

The token `c` begins a comment, which continues to the end of the line, and may appear anywhere (including within a clause).
A line beginning with `%` ends the formula, as in files from SATLIB.

The count of clauses on the problem line is not checked against the clauses read.
*/

use std::io::BufRead;

use crate::err;

/// A formula, as clauses of wire literals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    /// The greatest atom of the formula, from either the problem line or some clause.
    pub atoms: i32,

    pub clauses: Vec<Vec<i32>>,
}

impl Formula {
    /// Extends the formula with the clauses of another.
    pub fn extend(&mut self, other: Formula) {
        self.atoms = self.atoms.max(other.atoms);
        self.clauses.extend(other.clauses);
    }
}

fn literal_from_token(token: &str, line: usize) -> Result<i32, err::Parse> {
    let invalid = || err::Parse::Literal {
        line,
        token: token.to_string(),
    };

    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }

    match token.parse::<i32>() {
        Ok(literal) if literal != i32::MIN => Ok(literal),
        _ => Err(invalid()),
    }
}

/// Reads a formula.
pub fn read_dimacs(mut file_reader: impl BufRead) -> Result<Formula, err::Parse> {
    let mut buffer = String::with_capacity(1024);
    let mut clause_buffer: Vec<i32> = Vec::default();
    let mut formula = Formula::default();

    let mut line_counter = 0;
    // Tokens of the problem line read so far.
    let mut header_tokens = 0;

    'formula_loop: loop {
        buffer.clear();
        match file_reader.read_line(&mut buffer) {
            Ok(0) => break,
            Ok(_) => line_counter += 1,
            Err(_) => return Err(err::Parse::Line(line_counter + 1)),
        }

        if header_tokens == 4 && buffer.starts_with('%') {
            break 'formula_loop;
        }

        for token in buffer.split_whitespace() {
            if token == "c" {
                break;
            }

            match header_tokens {
                0 | 1 => {
                    let expected = if header_tokens == 0 { "p" } else { "cnf" };
                    if token != expected {
                        return Err(err::Parse::ProblemSpecification(line_counter));
                    }
                    header_tokens += 1;
                }

                2 | 3 => {
                    let count = match token.parse::<i32>() {
                        Ok(count) if count >= 0 => count,
                        _ => return Err(err::Parse::ProblemSpecification(line_counter)),
                    };
                    if header_tokens == 2 {
                        formula.atoms = count;
                    }
                    header_tokens += 1;
                }

                _ => match literal_from_token(token, line_counter)? {
                    0 => formula.clauses.push(std::mem::take(&mut clause_buffer)),
                    literal => {
                        formula.atoms = formula.atoms.max(literal.abs());
                        clause_buffer.push(literal);
                    }
                },
            }
        }
    }

    if header_tokens < 4 {
        return Err(err::Parse::ProblemSpecification(line_counter));
    }

    if !clause_buffer.is_empty() {
        return Err(err::Parse::UnterminatedClause);
    }

    Ok(formula)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clauses(input: &str) -> Vec<Vec<i32>> {
        read_dimacs(input.as_bytes()).unwrap().clauses
    }

    #[test]
    fn clauses_per_line() {
        let input = "p cnf 4 2
1 2 0
-1 3 4 0
1 0
";
        let formula = read_dimacs(input.as_bytes()).unwrap();
        assert_eq!(formula.clauses, vec![vec![1, 2], vec![-1, 3, 4], vec![1]]);
        assert_eq!(formula.atoms, 4);
    }

    #[test]
    fn no_line_breaks() {
        assert_eq!(
            clauses("p cnf 4 2 1 2 0 -1 3 4 0 1 0"),
            vec![vec![1, 2], vec![-1, 3, 4], vec![1]]
        );
    }

    #[test]
    fn empty_formula() {
        assert!(clauses("p cnf 0 0").is_empty());
        assert!(clauses("c comment comment2\np cnf 0 0").is_empty());
        assert!(clauses("c\np cnf 0 0").is_empty());
    }

    #[test]
    fn empty_clauses() {
        assert_eq!(clauses("p cnf 0 1\n    0"), vec![Vec::<i32>::new()]);
        assert_eq!(
            clauses("p cnf 2 1\n  1 2 0\n  0\n  -1 -2 0"),
            vec![vec![1, 2], vec![], vec![-1, -2]]
        );
    }

    #[test]
    fn comments() {
        let expected = vec![vec![1, 2], vec![-1, 3, 4], vec![1]];

        assert_eq!(clauses("p cnf 4 2\n1 2 0\n-1 3 4 0\n1 0\nc comment"), expected);
        assert_eq!(clauses("p cnf 4 2\n1 2 0\n-1 3 4 0\n1 0\nc"), expected);
        assert_eq!(
            clauses("p cnf 4 2\n1 2 0\nc comment 1\n-1 3 4 0\n\n  c comment 2\n1 0"),
            expected
        );
    }

    #[test]
    fn comment_within_clause() {
        assert_eq!(
            clauses("p cnf 4 2\n1 2 c 1 4 5\n-1 3 4 0\n1 0"),
            vec![vec![1, 2, -1, 3, 4], vec![1]]
        );
    }

    #[test]
    fn satlib_terminator() {
        assert_eq!(clauses("p cnf 3 1\n1 -3 0\n%\n0\n"), vec![vec![1, -3]]);
    }

    #[test]
    fn atoms_beyond_the_header() {
        let formula = read_dimacs("p cnf 2 1\n1 -7 0".as_bytes()).unwrap();
        assert_eq!(formula.atoms, 7);
    }

    #[test]
    fn out_of_range_literals() {
        for input in [
            "p cnf 1 1\n-10000000000 0",
            "p cnf 1 1\n10000000000 0",
            "p cnf 1 1\n-2147483648 0",
        ] {
            assert!(matches!(
                read_dimacs(input.as_bytes()),
                Err(err::Parse::Literal { line: 2, .. })
            ));
        }
    }

    #[test]
    fn invalid_literals() {
        for input in ["p cnf 1 1\n+10 0", "p cnf 1 1\nabc 0", "p cnf 1 1\n1abc 0"] {
            assert!(matches!(
                read_dimacs(input.as_bytes()),
                Err(err::Parse::Literal { .. })
            ));
        }
    }

    #[test]
    fn invalid_header() {
        assert_eq!(
            read_dimacs("".as_bytes()),
            Err(err::Parse::ProblemSpecification(0))
        );
        assert_eq!(
            read_dimacs("p dnf 1 1\n1 0".as_bytes()),
            Err(err::Parse::ProblemSpecification(1))
        );
        assert_eq!(
            read_dimacs("p cnf -1 1\n1 0".as_bytes()),
            Err(err::Parse::ProblemSpecification(1))
        );
        assert_eq!(
            read_dimacs("1 2 0".as_bytes()),
            Err(err::Parse::ProblemSpecification(1))
        );
    }

    #[test]
    fn unterminated_clause() {
        assert_eq!(
            read_dimacs("p cnf 2 1\n1 2".as_bytes()),
            Err(err::Parse::UnterminatedClause)
        );
    }
}
