use crate::data::filter::filtered_indices;
use crate::data::loader::LoadError;
use crate::data::model::{Dataset, Row};
use crate::data::paginate::{self, PageSize};
use crate::data::sort::{sort_rows, SortState};

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Search term and page position chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    /// 1-based.
    pub page_index: usize,
    pub page_size: PageSize,
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            search_term: String::new(),
            page_index: 1,
            page_size,
        }
    }
}

// ---------------------------------------------------------------------------
// Table state
// ---------------------------------------------------------------------------

/// The full table-page state, independent of rendering.
///
/// `dataset` is the only stored ordering. Filtered rows, page count and the
/// visible slice are recomputed from it on every call.
pub struct TableState {
    /// Loaded rows (empty until the first successful load).
    pub dataset: Dataset,

    /// Active sort column and direction.
    pub sort: SortState,

    /// Search term and pagination.
    pub view: ViewState,

    /// Whether a load is in flight.
    pub loading: bool,

    /// Last load error, shown in the top bar.
    pub status_message: Option<String>,
}

impl TableState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            dataset: Dataset::default(),
            sort: SortState::default(),
            view: ViewState::new(page_size),
            loading: true,
            status_message: None,
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the dataset wholesale after a successful load.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        log::info!(
            "Loaded {} rows with columns {:?}",
            dataset.len(),
            dataset.columns
        );
        self.dataset = dataset;
        self.sort = SortState::default();
        self.status_message = None;
        self.loading = false;
        self.clamp_page();
    }

    /// Record a failed load. Whatever was displayed stays displayed.
    pub fn load_failed(&mut self, err: &LoadError) {
        log::error!("Error loading the CSV resource: {err:#}");
        self.status_message = Some(format!("Error: {err}"));
        self.loading = false;
    }

    /// Sort the dataset by `key`, toggling direction on repeated picks.
    pub fn sort_by(&mut self, key: &str) {
        self.sort = self.sort.next(key);
        log::debug!("Sorting by {key} ({:?})", self.sort.direction);
        sort_rows(&mut self.dataset.rows, key, self.sort.direction);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.search_term = term.into();
        self.clamp_page();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.view.page_size = page_size;
        self.clamp_page();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.view.page_index = paginate::clamp_page(page, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.view.page_index.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.view.page_index.saturating_sub(1));
    }

    fn clamp_page(&mut self) {
        self.go_to_page(self.view.page_index);
    }

    /// Indices of rows matching the current search term, in dataset order.
    pub fn filtered_indices(&self) -> Vec<usize> {
        filtered_indices(&self.dataset, &self.view.search_term)
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.filtered_indices().len(), self.view.page_size)
    }

    pub fn is_first_page(&self) -> bool {
        self.view.page_index <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.view.page_index >= self.total_pages()
    }

    /// Rows on the current page after filtering and sorting.
    pub fn visible_rows(&self) -> Vec<&Row> {
        let hits = self.filtered_indices();
        paginate::page_slice(&hits, self.view.page_index, self.view.page_size)
            .iter()
            .map(|&i| &self.dataset.rows[i])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load, parse_csv, Normalization, Source};
    use crate::data::sort::SortDirection;

    fn domains(rows: &[&Row]) -> Vec<String> {
        rows.iter()
            .map(|r| r.get("Domain").unwrap().to_string())
            .collect()
    }

    fn numbered(n: usize) -> Dataset {
        let mut text = String::from("Domain,Traffic\n");
        for i in 0..n {
            text.push_str(&format!("site{i:03}.com,{i}\n"));
        }
        parse_csv(&text, &Normalization::default()).unwrap()
    }

    #[test]
    fn worked_example() {
        let text = "Domain,Traffic\nb.com,\"1,000\"\na.com,\n";
        let mut state = TableState::new(PageSize::Ten);
        state.set_dataset(parse_csv(text, &Normalization::default()).unwrap());

        let traffic: Vec<&str> = state
            .dataset
            .rows
            .iter()
            .map(|r| r.get("Traffic").unwrap())
            .collect();
        assert_eq!(traffic, vec!["1000", "Not provided"]);

        state.sort_by("Domain");
        assert_eq!(domains(&state.visible_rows()), vec!["a.com", "b.com"]);

        state.set_search("a");
        assert_eq!(domains(&state.visible_rows()), vec!["a.com"]);
    }

    #[test]
    fn starts_loading_and_finishes_on_success() {
        let mut state = TableState::new(PageSize::Ten);
        assert!(state.loading);
        state.set_dataset(numbered(3));
        assert!(!state.loading);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn failed_load_leaves_empty_dataset_and_stops_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = TableState::new(PageSize::Ten);

        match load(
            &Source::Path(dir.path().join("Domain.csv")),
            &Normalization::default(),
        ) {
            Ok(ds) => state.set_dataset(ds),
            Err(e) => state.load_failed(&e),
        }

        assert!(!state.loading);
        assert!(state.dataset.is_empty());
        assert!(state.status_message.is_some());
        assert!(state.visible_rows().is_empty());
        assert_eq!(state.total_pages(), 0);
    }

    #[test]
    fn http_error_leaves_empty_dataset_and_stops_loading() {
        let url = crate::data::loader::test_server::serve_once("500 Internal Server Error", "");
        let mut state = TableState::new(PageSize::Ten);

        let err = load(&Source::parse(&url), &Normalization::default()).unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 500, .. }));
        state.load_failed(&err);

        assert!(!state.loading);
        assert!(state.dataset.is_empty());
        assert!(state.visible_rows().is_empty());
        assert_eq!(
            state.status_message.as_deref(),
            Some(format!("Error: {url} answered with HTTP 500").as_str())
        );
    }

    #[test]
    fn failed_reload_keeps_prior_rows() {
        let mut state = TableState::new(PageSize::Ten);
        state.set_dataset(numbered(4));
        state.begin_load();
        state.load_failed(&LoadError::Interrupted);

        assert!(!state.loading);
        assert_eq!(state.dataset.len(), 4);
    }

    #[test]
    fn sort_order_sticks_across_filter_and_paging() {
        let mut state = TableState::new(PageSize::Five);
        state.set_dataset(numbered(12));
        state.sort_by("Domain");
        state.sort_by("Domain");
        assert_eq!(state.sort.direction, SortDirection::Descending);

        state.set_search("site01");
        assert_eq!(
            domains(&state.visible_rows()),
            vec!["site011.com", "site010.com"]
        );

        state.set_search("");
        state.next_page();
        assert_eq!(state.view.page_index, 2);
        assert_eq!(domains(&state.visible_rows())[0], "site006.com");
    }

    #[test]
    fn filter_is_not_stored() {
        let mut state = TableState::new(PageSize::Ten);
        state.set_dataset(numbered(5));
        state.set_search("site002");
        assert_eq!(state.dataset.len(), 5);
        assert_eq!(state.filtered_indices(), vec![2]);
    }

    #[test]
    fn page_navigation_is_clamped() {
        let mut state = TableState::new(PageSize::Ten);
        state.set_dataset(numbered(25));
        assert!(state.is_first_page());

        state.prev_page();
        assert_eq!(state.view.page_index, 1);

        for _ in 0..10 {
            state.next_page();
        }
        assert_eq!(state.view.page_index, 3);
        assert!(state.is_last_page());
        assert_eq!(state.visible_rows().len(), 5);
    }

    #[test]
    fn larger_page_size_clamps_current_page() {
        let mut state = TableState::new(PageSize::Five);
        state.set_dataset(numbered(30));
        state.go_to_page(3);
        assert_eq!(state.view.page_index, 3);

        state.set_page_size(PageSize::Twenty);
        assert_eq!(state.total_pages(), 2);
        assert_eq!(state.view.page_index, 2);
        assert_eq!(state.visible_rows().len(), 10);

        state.set_page_size(PageSize::Fifty);
        assert_eq!(state.view.page_index, 1);
        assert_eq!(state.visible_rows().len(), 30);
    }

    #[test]
    fn smaller_page_size_keeps_page_index() {
        let mut state = TableState::new(PageSize::Ten);
        state.set_dataset(numbered(30));
        state.go_to_page(2);
        state.set_page_size(PageSize::Five);
        assert_eq!(state.view.page_index, 2);
        assert_eq!(domains(&state.visible_rows())[0], "site005.com");
    }

    #[test]
    fn narrowing_search_clamps_page() {
        let mut state = TableState::new(PageSize::Five);
        state.set_dataset(numbered(30));
        state.go_to_page(6);

        state.set_search("site00");
        assert_eq!(state.total_pages(), 2);
        assert_eq!(state.view.page_index, 2);
        assert_eq!(
            domains(&state.visible_rows()),
            vec!["site005.com", "site006.com", "site007.com", "site008.com", "site009.com"]
        );
    }

    #[test]
    fn reload_resets_sort() {
        let mut state = TableState::new(PageSize::Ten);
        state.set_dataset(numbered(3));
        state.sort_by("Traffic");
        state.set_dataset(numbered(2));
        assert_eq!(state.sort, SortState::default());
    }
}
