//! Text fixups applied after serialization.
//!
//! Run in order by [`tidy`]:
//! 1. strip the legacy namespace declaration
//! 2. strip `xmlns=""` declarations left behind
//! 3. collapse empty `ProjectReference` elements into self-closing form
//! 4. label the output encoding as UTF-8

use super::name::PROJECT_REFERENCE;

/// Apply every fixup in order.
pub fn tidy(text: &str, namespace: &str) -> String {
    let text = strip_namespace(text, namespace);
    let text = strip_namespace(&text, "");
    let text = collapse_empty_elements(&text, PROJECT_REFERENCE);
    normalize_encoding_label(&text)
}

/// Remove every ` xmlns="{uri}"` declaration.
pub fn strip_namespace(text: &str, uri: &str) -> String {
    let decl = format!(" xmlns=\"{uri}\"");
    text.replace(&decl, "")
}

/// Rewrite `<tag ...>` + whitespace + `</tag>` as `<tag .../>`.
pub fn collapse_empty_elements(text: &str, tag: &str) -> String {
    let close = format!("</{tag}>");
    let open = format!("<{tag}");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(&close) {
        let before = &rest[..pos];
        let trimmed = before.trim_end();
        let opener = trimmed
            .ends_with('>')
            .then(|| trimmed.rfind('<'))
            .flatten()
            .map(|lt| &trimmed[lt..]);

        let collapsible = opener.is_some_and(|o| {
            o.starts_with(&open)
                && o[open.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c == '>' || c.is_whitespace())
                && !o.ends_with("/>")
        });

        if collapsible {
            out.push_str(&trimmed[..trimmed.len() - 1]);
            out.push_str("/>");
        } else {
            out.push_str(before);
            out.push_str(&close);
        }
        rest = &rest[pos + close.len()..];
    }
    out.push_str(rest);
    out
}

/// Set the declaration's `encoding` pseudo-attribute to `utf-8`.
///
/// Output is always written as UTF-8, whatever the source declared.
pub fn normalize_encoding_label(text: &str) -> String {
    let Some(end) = text.starts_with("<?xml").then(|| text.find("?>")).flatten() else {
        return text.to_string();
    };
    let decl = &text[..end];
    let Some(start) = decl.find("encoding=") else {
        return text.to_string();
    };
    let value_start = start + "encoding=".len();
    let Some(quote) = decl[value_start..].chars().next().filter(|c| *c == '"' || *c == '\'')
    else {
        return text.to_string();
    };
    let Some(len) = decl[value_start + 1..].find(quote) else {
        return text.to_string();
    };
    let value_end = value_start + 1 + len + 1;

    format!(
        "{}encoding=\"utf-8\"{}",
        &text[..start],
        &text[value_end..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::name::MSBUILD_NAMESPACE;

    #[test]
    fn test_strip_namespace() {
        let text = format!("<Project Sdk=\"x\" xmlns=\"{MSBUILD_NAMESPACE}\"><A xmlns=\"\"/></Project>");
        assert_eq!(
            tidy(&text, MSBUILD_NAMESPACE),
            "<Project Sdk=\"x\"><A/></Project>"
        );
    }

    #[test]
    fn test_strip_namespace_keeps_other_uris() {
        let text = "<a xmlns=\"urn:other\"/>";
        assert_eq!(strip_namespace(text, MSBUILD_NAMESPACE), text);
    }

    #[test]
    fn test_collapse_empty_project_references() {
        let text = "<ProjectReference Include=\"a.csproj\"></ProjectReference>\r\n\
                    <ProjectReference Include=\"b.csproj\">\r\n    </ProjectReference>";
        assert_eq!(
            collapse_empty_elements(text, PROJECT_REFERENCE),
            "<ProjectReference Include=\"a.csproj\"/>\r\n\
             <ProjectReference Include=\"b.csproj\"/>"
        );
    }

    #[test]
    fn test_collapse_keeps_elements_with_content() {
        let text = "<ProjectReference Include=\"a\"><Name>a</Name></ProjectReference>";
        assert_eq!(collapse_empty_elements(text, PROJECT_REFERENCE), text);

        let text = "<ProjectReferenceX></ProjectReference>";
        assert_eq!(collapse_empty_elements(text, PROJECT_REFERENCE), text);
    }

    #[test]
    fn test_normalize_encoding_label() {
        assert_eq!(
            normalize_encoding_label("<?xml version=\"1.0\" encoding=\"utf-16\"?>\r\n<a/>"),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<a/>"
        );
        assert_eq!(
            normalize_encoding_label("<?xml version='1.0' encoding='UTF-8'?><a/>"),
            "<?xml version='1.0' encoding=\"utf-8\"?><a/>"
        );
        assert_eq!(normalize_encoding_label("<a encoding=\"x\"/>"), "<a encoding=\"x\"/>");
        assert_eq!(
            normalize_encoding_label("<?xml version=\"1.0\"?><a/>"),
            "<?xml version=\"1.0\"?><a/>"
        );
    }
}
