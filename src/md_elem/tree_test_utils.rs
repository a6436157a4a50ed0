#[cfg(test)]
pub(crate) use test_utils::*;

#[cfg(test)]
mod test_utils {
    /// Builds a `Vec<Inline>` from a terse description.
    ///
    /// ```text
    /// inlines!["plain ", em["emphasized"], strong["bold ", em["both"]], link["text"]("https://example.com")]
    /// ```
    macro_rules! inlines {
        // Empty case
        [] => {
            Vec::<crate::md_elem::Inline>::new()
        };

        // String literal (optionally followed by more content)
        [$text:literal $(, $($rest:tt)*)?] => {
            {
                #[allow(unused_mut)]
                let mut result = vec![crate::md_elem::Inline::Text($text.to_string())];
                $(result.extend(inlines![$($rest)*]);)?
                result
            }
        };

        // Emphasis (optionally followed by more content)
        [em[$($content:tt)*] $(, $($rest:tt)*)?] => {
            {
                #[allow(unused_mut)]
                let mut result = vec![crate::md_elem::Inline::Emphasis(inlines![$($content)*])];
                $(result.extend(inlines![$($rest)*]);)?
                result
            }
        };

        // Strong (optionally followed by more content)
        [strong[$($content:tt)*] $(, $($rest:tt)*)?] => {
            {
                #[allow(unused_mut)]
                let mut result = vec![crate::md_elem::Inline::Strong(inlines![$($content)*])];
                $(result.extend(inlines![$($rest)*]);)?
                result
            }
        };

        // Link (optionally followed by more content)
        [link[$($display:tt)*] ($url:literal) $(, $($rest:tt)*)?] => {
            {
                #[allow(unused_mut)]
                let mut result = vec![crate::md_elem::Inline::link(inlines![$($display)*], $url)];
                $(result.extend(inlines![$($rest)*]);)?
                result
            }
        };

        // Image (optionally followed by more content)
        [img[$($alt:tt)*] ($url:literal) $(, $($rest:tt)*)?] => {
            {
                #[allow(unused_mut)]
                let mut result = vec![crate::md_elem::Inline::image(inlines![$($alt)*], $url)];
                $(result.extend(inlines![$($rest)*]);)?
                result
            }
        };

        // Inline code, like `code("foo()")`
        [code($val:literal) $(, $($rest:tt)*)?] => {
            {
                #[allow(unused_mut)]
                let mut result = vec![crate::md_elem::Inline::Code($val.to_string())];
                $(result.extend(inlines![$($rest)*]);)?
                result
            }
        };
    }
    pub(crate) use inlines;

    /// A paragraph of plain text.
    macro_rules! para {
        ($text:literal) => {
            crate::md_elem::Block::paragraph(inlines![$text])
        };
    }
    pub(crate) use para;

    /// A list whose items are each given as a `[block, block, ...]` group.
    macro_rules! list {
        ($list_type:ident; $([$($block:expr),* $(,)?]),* $(,)?) => {
            crate::md_elem::Block::List(crate::md_elem::List {
                items: vec![$(vec![$($block),*]),*],
                list_type: crate::md_elem::ListType::$list_type,
            })
        };
    }
    pub(crate) use list;

    macro_rules! quote {
        [$($block:expr),* $(,)?] => {
            crate::md_elem::Block::BlockQuote(crate::md_elem::BlockQuote {
                items: vec![$($block),*],
            })
        };
    }
    pub(crate) use quote;
}
