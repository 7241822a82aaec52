use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

#[derive(ramhorns::Content)]
struct ViewPage<'a> {
    page_title: &'a str,
    page_content: &'a str,
}

/// Renders standalone pages: the story page and program shells.
pub struct PageRenderer<'a> {
    pub template: Template<'a>,
}

impl PageRenderer<'_> {
    pub fn new(page_tpl_src: &str) -> io::Result<PageRenderer> {
        let template = match Template::new(page_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing page template: {}", e),
                ));
            }
        };

        Ok(PageRenderer { template })
    }

    pub fn render(&self, page_title: &str, content_html: &str) -> String {
        self.template.render(&ViewPage {
            page_title,
            page_content: content_html,
        })
    }
}
