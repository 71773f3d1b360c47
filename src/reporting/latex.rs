//! LaTeX fragments used by the report sections.

/// Wrap `body` (which should end with a newline) in a verbatim environment.
pub fn verbatim(body: &str) -> String {
    format!("\\begin{{verbatim}}\n{}\\end{{verbatim}}\n", body)
}

/// Single-line verbatim, padded with spaces inside the environment.
pub fn inline_verbatim(text: &str) -> String {
    format!("\\begin{{verbatim}} {} \\end{{verbatim}}", text)
}

pub fn section(title: &str) -> String {
    format!("\\section{{{}}}\n", title)
}

pub fn subsection(title: &str) -> String {
    format!("\\subsection {{{}}}\n", title)
}

/// Itemized list; each item body is set verbatim.
pub fn itemize<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("\\begin{itemize}\n");
    for item in items {
        out.push_str(&format!("\\item \\begin{{verbatim}}{} \\end{{verbatim}}\n", item));
    }
    out.push_str("\\end{itemize}\n");
    out
}
