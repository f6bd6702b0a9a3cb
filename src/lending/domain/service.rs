use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use crate::books::domain::{validate_isbn, validate_title, Book};
use crate::books::domain::catalog::Catalog;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{CatalogRepository, Change};
use crate::lending::domain::{LendingService, LoanBy};
use crate::lending::dto::{LoanDto, ReturnDto};
use crate::utils::date::{due_date, today};

pub struct LendingServiceImpl {
    loan_days: i64,
    repository: Arc<CatalogRepository>,
    clock: fn() -> NaiveDate,
}

impl LendingServiceImpl {
    pub fn new(config: &Configuration, repository: Arc<CatalogRepository>) -> Self {
        Self {
            loan_days: config.loan_days,
            repository,
            clock: today,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub async fn loan(&self, by: LoanBy) -> LibraryResult<LoanDto> {
        let (clock, loan_days) = (self.clock, self.loan_days);
        let key = by.key().to_string();
        let res = self.run(move |repository| {
            repository.perform(|catalog| {
                let book = find_for_loan(catalog, &by)?;
                if !book.lend() {
                    return Err(LibraryError::failed_precondition(
                        format!("no copies of {:?} available", book.title()).as_str()));
                }
                // the date is read once the lock is held, not when the request arrived
                let due = due_date(clock(), loan_days);
                tracing::info!(isbn = %book.isbn(), title = %book.title(), available = book.available(), %due, "loan recorded");
                Ok(Change::Mutated(LoanDto::new(book, due)))
            })
        }).await;
        trace_failure("loan", key.as_str(), res)
    }

    // run moves one critical section onto the blocking worker pool; a caller waiting
    // for the repository lock occupies a worker, never an async executor thread.
    async fn run<T, F>(&self, op: F) -> LibraryResult<T>
        where T: Send + 'static,
              F: FnOnce(&CatalogRepository) -> LibraryResult<T> + Send + 'static {
        let repository = self.repository.clone();
        tokio::task::spawn_blocking(move || op(&repository)).await
            .map_err(|err| LibraryError::runtime(format!("lending worker failed {:?}", err).as_str()))?
    }
}

fn find_for_loan<'a>(catalog: &'a mut Catalog, by: &LoanBy) -> LibraryResult<&'a mut BookEntity> {
    match by {
        LoanBy::Isbn(isbn) => catalog.find_by_isbn_mut(isbn)
            .ok_or_else(|| LibraryError::not_found(format!("no book with isbn {}", isbn).as_str())),
        LoanBy::Title(title) => catalog.find_by_title_mut(title)
            .ok_or_else(|| LibraryError::not_found(format!("no book titled {:?}", title).as_str())),
    }
}

fn trace_failure<T>(op: &str, key: &str, res: LibraryResult<T>) -> LibraryResult<T> {
    if let Err(err) = &res {
        if err.is_internal() {
            tracing::error!(op, key, "lending failed: {}", err);
        } else {
            tracing::warn!(op, key, "lending rejected: {}", err);
        }
    }
    res
}

#[async_trait]
impl LendingService for LendingServiceImpl {
    async fn query(&self, isbn: &str) -> LibraryResult<BookDto> {
        let isbn = validate_isbn(isbn)?.to_string();
        let key = isbn.clone();
        let res = self.run(move |repository| {
            repository.perform(|catalog| {
                catalog.find_by_isbn(isbn.as_str())
                    .map(|book| Change::Unchanged(BookDto::from(book)))
                    .ok_or_else(|| LibraryError::not_found(format!("no book with isbn {}", isbn).as_str()))
            })
        }).await;
        trace_failure("query", key.as_str(), res)
    }

    async fn loan_by_isbn(&self, isbn: &str) -> LibraryResult<LoanDto> {
        let isbn = validate_isbn(isbn)?;
        self.loan(LoanBy::Isbn(isbn.to_string())).await
    }

    async fn loan_by_title(&self, title: &str) -> LibraryResult<LoanDto> {
        let title = validate_title(title)?;
        self.loan(LoanBy::Title(title.to_string())).await
    }

    async fn return_by_isbn(&self, isbn: &str) -> LibraryResult<ReturnDto> {
        let isbn = validate_isbn(isbn)?.to_string();
        let key = isbn.clone();
        let res = self.run(move |repository| {
            repository.perform(|catalog| {
                let book = catalog.find_by_isbn_mut(isbn.as_str())
                    .ok_or_else(|| LibraryError::not_found(format!("no book with isbn {}", isbn).as_str()))?;
                if !book.take_back() {
                    return Err(LibraryError::failed_precondition(
                        format!("no copies of {:?} are on loan", book.title()).as_str()));
                }
                tracing::info!(isbn = %book.isbn(), title = %book.title(), available = book.available(), "return recorded");
                Ok(Change::Mutated(ReturnDto::from(&*book)))
            })
        }).await;
        trace_failure("return", key.as_str(), res)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::{mpsc, Arc};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::thread;
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;
    use crate::books::factory::create_catalog_repository;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::core::repository::Change;
    use crate::lending::domain::LendingService;
    use crate::lending::domain::service::LendingServiceImpl;

    const SAMPLE: &str = "9780134685991|Effective Java|Joshua Bloch|5|2\n\
                          9780132350884|Clean Code|Robert C. Martin|1|1\n\
                          9780201633610|Design Patterns|Erich Gamma|2|0\n";

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 27).expect("valid date")
    }

    static DAYS_PASSED: AtomicI64 = AtomicI64::new(0);

    fn rolling_today() -> NaiveDate {
        fixed_today() + Duration::days(DAYS_PASSED.load(Ordering::SeqCst))
    }

    fn build_service(content: &str) -> (TempDir, Configuration, LendingServiceImpl) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("catalog.txt");
        fs::write(&path, content).expect("seed catalog");
        let config = Configuration::new(path.to_str().expect("utf8 path"));
        let svc = LendingServiceImpl::new(&config, create_catalog_repository(&config))
            .with_clock(fixed_today);
        (dir, config, svc)
    }

    fn stored(config: &Configuration) -> String {
        fs::read_to_string(&config.data_file).expect("read catalog")
    }

    #[tokio::test]
    async fn test_should_query_book() {
        let (_dir, _config, svc) = build_service(SAMPLE);
        let book = svc.query("9780134685991").await.expect("should find book");
        assert_eq!("Effective Java", book.title.as_str());
        assert_eq!("Joshua Bloch", book.author.as_str());
        assert_eq!(5, book.total_copies);
        assert_eq!(2, book.borrowed_copies);
        assert_eq!(3, book.available);
    }

    #[tokio::test]
    async fn test_should_not_find_missing_book() {
        let (_dir, config, svc) = build_service(SAMPLE);
        assert!(matches!(svc.query("9780000000000").await, Err(LibraryError::NotFound{ .. })));
        assert!(matches!(svc.loan_by_isbn("9780000000000").await, Err(LibraryError::NotFound{ .. })));
        assert!(matches!(svc.loan_by_title("Effective java").await, Err(LibraryError::NotFound{ .. })));
        assert!(matches!(svc.return_by_isbn("9780000000000").await, Err(LibraryError::NotFound{ .. })));
        assert_eq!(SAMPLE, stored(&config));
    }

    #[tokio::test]
    async fn test_should_loan_and_return_by_isbn() {
        let (_dir, config, svc) = build_service(SAMPLE);
        let loan = svc.loan_by_isbn("9780134685991").await.expect("should loan");
        assert_eq!(NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"), loan.due_date);
        assert_eq!(2, loan.available_after);
        assert!(stored(&config).starts_with("9780134685991|Effective Java|Joshua Bloch|5|3\n"));

        let returned = svc.return_by_isbn("9780134685991").await.expect("should return");
        assert_eq!(3, returned.available_after);
        assert_eq!(SAMPLE, stored(&config));
    }

    #[tokio::test]
    async fn test_should_loan_by_title() {
        let (_dir, _config, svc) = build_service(SAMPLE);
        let loan = svc.loan_by_title("  Design Patterns ").await.expect("should loan");
        assert_eq!("9780201633610", loan.isbn.as_str());
        assert_eq!(1, loan.available_after);
    }

    #[tokio::test]
    async fn test_should_refuse_loan_without_stock() {
        let (_dir, config, svc) = build_service(SAMPLE);
        let res = svc.loan_by_isbn("9780132350884").await;
        assert!(matches!(res, Err(LibraryError::FailedPrecondition{ .. })));
        let res = svc.loan_by_title("Clean Code").await;
        assert!(matches!(res, Err(LibraryError::FailedPrecondition{ .. })));
        assert_eq!(SAMPLE, stored(&config));
    }

    #[tokio::test]
    async fn test_should_refuse_return_without_loans() {
        let (_dir, config, svc) = build_service(SAMPLE);
        let res = svc.return_by_isbn("9780201633610").await;
        assert!(matches!(res, Err(LibraryError::FailedPrecondition{ .. })));
        assert_eq!(SAMPLE, stored(&config));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_arguments_before_loading() {
        // a corrupt store proves the store is never read for bad input
        let (_dir, config, svc) = build_service("not a record\n");
        assert!(matches!(svc.query("123").await, Err(LibraryError::InvalidArgument{ .. })));
        assert!(matches!(svc.loan_by_isbn("123").await, Err(LibraryError::InvalidArgument{ .. })));
        assert!(matches!(svc.loan_by_title("   ").await, Err(LibraryError::InvalidArgument{ .. })));
        assert!(matches!(svc.return_by_isbn("97801346859X1").await, Err(LibraryError::InvalidArgument{ .. })));
        assert_eq!("not a record\n", stored(&config));
        assert!(matches!(svc.query("9780134685991").await, Err(LibraryError::CorruptRecord{ line: 1, .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_grant_exactly_available_loans() {
        let (_dir, config, svc) = build_service(SAMPLE);
        let svc = Arc::new(svc);
        let handles: Vec<_> = (0..12).map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.loan_by_isbn("9780134685991").await })
        }).collect();
        let mut granted = 0;
        let mut refused = 0;
        for handle in handles {
            match handle.await.expect("task") {
                Ok(_) => granted += 1,
                Err(LibraryError::FailedPrecondition { .. }) => refused += 1,
                Err(err) => panic!("unexpected error {}", err),
            }
        }
        assert_eq!(3, granted);
        assert_eq!(9, refused);
        assert!(stored(&config).starts_with("9780134685991|Effective Java|Joshua Bloch|5|5\n"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_should_date_loan_when_lock_is_acquired() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("catalog.txt");
        fs::write(&path, SAMPLE).expect("seed catalog");
        let config = Configuration::new(path.to_str().expect("utf8 path"));
        let repository = create_catalog_repository(&config);
        let svc = LendingServiceImpl::new(&config, repository.clone()).with_clock(rolling_today);

        let (locked_tx, locked_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let holder = thread::spawn(move || {
            repository.perform(|_| {
                locked_tx.send(()).expect("signal lock held");
                release_rx.recv().expect("wait for release");
                Ok(Change::Unchanged(()))
            })
        });
        locked_rx.recv().expect("lock held");

        let loan = tokio::spawn(async move { svc.loan_by_isbn("9780134685991").await });
        // let the loan reach the lock, then cross midnight while it waits
        thread::sleep(std::time::Duration::from_millis(200));
        DAYS_PASSED.store(1, Ordering::SeqCst);
        release_tx.send(()).expect("release lock");
        holder.join().expect("holder thread").expect("holder perform");

        let loan = loan.await.expect("task").expect("should loan");
        assert_eq!(NaiveDate::from_ymd_opt(2024, 3, 6).expect("valid date"), loan.due_date);
    }
}
