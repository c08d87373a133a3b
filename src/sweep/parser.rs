//! Result-page parsing contract
//!
//! The portal renders ASP.NET server controls whose element ids are the only
//! stable hooks into the page. Those ids live in [`ResultPageSchema`] and
//! nowhere else, so a markup change on the site touches this file alone.

use scraper::{ElementRef, Html, Selector};

/// Element identifiers for every field read from a result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPageSchema {
    /// Student name label; its presence marks a valid result page
    pub name_id: String,
    pub father_name_id: String,
    pub mother_name_id: String,
    pub college_name_id: String,
    pub branch_name_id: String,
    pub sgpa_id: String,

    /// Table holding the cumulative grade rows
    pub cgpa_table_id: String,

    /// Row of the CGPA table whose last cell is the current CGPA
    pub cgpa_row: usize,
}

impl Default for ResultPageSchema {
    fn default() -> Self {
        Self {
            name_id: "ContentPlaceHolder1_DataList1_StudentNameLabel_0".to_string(),
            father_name_id: "ContentPlaceHolder1_DataList1_FatherNameLabel_0".to_string(),
            mother_name_id: "ContentPlaceHolder1_DataList1_MotherNameLabel_0".to_string(),
            college_name_id: "ContentPlaceHolder1_DataList1_CollegeNameLabel_0".to_string(),
            branch_name_id: "ContentPlaceHolder1_DataList1_CourseLabel_0".to_string(),
            sgpa_id: "ContentPlaceHolder1_DataList5_GROSSTHEORYTOTALLabel_0".to_string(),
            cgpa_table_id: "ContentPlaceHolder1_GridView3".to_string(),
            cgpa_row: 1,
        }
    }
}

/// Selectors compiled once from a [`ResultPageSchema`]
#[derive(Debug, Clone)]
pub struct PageSelectors {
    name: Selector,
    father_name: Selector,
    mother_name: Selector,
    college_name: Selector,
    branch_name: Selector,
    sgpa: Selector,
    cgpa_table: Selector,
    cgpa_row: usize,
    row: Selector,
    cell: Selector,
}

impl PageSelectors {
    /// Compiles the schema's identifiers into CSS selectors
    ///
    /// # Returns
    ///
    /// * `Ok(PageSelectors)` - All identifiers compiled
    /// * `Err(String)` - An identifier is not a usable attribute value
    pub fn compile(schema: &ResultPageSchema) -> Result<Self, String> {
        Ok(Self {
            name: by_id("span", &schema.name_id)?,
            father_name: by_id("span", &schema.father_name_id)?,
            mother_name: by_id("span", &schema.mother_name_id)?,
            college_name: by_id("span", &schema.college_name_id)?,
            branch_name: by_id("span", &schema.branch_name_id)?,
            sgpa: by_id("span", &schema.sgpa_id)?,
            cgpa_table: by_id("table", &schema.cgpa_table_id)?,
            cgpa_row: schema.cgpa_row,
            row: compile("tr")?,
            cell: compile("td")?,
        })
    }
}

fn compile(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector '{}': {:?}", css, e))
}

fn by_id(tag: &str, id: &str) -> Result<Selector, String> {
    if id.is_empty() || id.contains('"') || id.contains('\\') {
        return Err(format!("invalid element id '{}'", id));
    }
    compile(&format!(r#"{}[id="{}"]"#, tag, id))
}

/// Fields read from a valid result page
///
/// Everything but the name is optional; callers substitute their own
/// placeholder for missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub name: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub college_name: Option<String>,
    pub branch_name: Option<String>,
    pub sgpa: Option<String>,
    pub cur_cgpa: Option<String>,
}

/// Parses a result page
///
/// # Returns
///
/// * `Some(ResultPage)` - The name label was found
/// * `None` - The document is not a result page (error page, blank form, ...)
pub fn parse_result_page(html: &str, selectors: &PageSelectors) -> Option<ResultPage> {
    let document = Html::parse_document(html);

    let name = select_text(&document, &selectors.name)?;

    Some(ResultPage {
        name,
        father_name: select_text(&document, &selectors.father_name),
        mother_name: select_text(&document, &selectors.mother_name),
        college_name: select_text(&document, &selectors.college_name),
        branch_name: select_text(&document, &selectors.branch_name),
        sgpa: select_text(&document, &selectors.sgpa),
        cur_cgpa: extract_cgpa(&document, selectors),
    })
}

/// Trimmed text of the first element matching `selector`
fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Last cell of the configured row in the CGPA table
fn extract_cgpa(document: &Html, selectors: &PageSelectors) -> Option<String> {
    let table = document.select(&selectors.cgpa_table).next()?;
    let row = table.select(&selectors.row).nth(selectors.cgpa_row)?;
    row.select(&selectors.cell).last().map(element_text)
}
