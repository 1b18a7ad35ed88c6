#[cfg(test)]
mod tests {
    use crate::chat::*;
    use crate::dashboard::*;
    use crate::documents::*;
    use crate::event_bus::EventBus;
    use crate::health::{probe, ApiStatus};
    use crate::ports::*;
    use crate::upload::*;
    use crate::view::ViewState;
    use unibot_types::api::*;
    use unibot_types::document::*;
    use unibot_types::event::ClientEvent;
    use unibot_types::message::Origin;
    use unibot_types::session::SessionSource;
    use unibot_types::{ClientError, UploadRejection};

    use async_trait::async_trait;
    use futures::channel::oneshot;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::task::{Context, Poll, Wake, Waker};

    const MIB: usize = 1024 * 1024;

    // ─── Executor helpers ────────────────────────────────────

    struct NoopWaker;
    impl Wake for NoopWaker {
        fn wake(self: Arc<Self>) {}
    }

    fn poll_once<F: Future + ?Sized>(f: Pin<&mut F>) -> Poll<F::Output> {
        let waker = Waker::from(Arc::new(NoopWaker));
        let mut cx = Context::from_waker(&waker);
        f.poll(&mut cx)
    }

    // Mock ports resolve immediately, so a single poll completes them.
    fn block_on<F: Future<Output = T>, T>(f: F) -> T {
        let mut f = std::pin::pin!(f);
        loop {
            if let Poll::Ready(val) = poll_once(f.as_mut()) {
                return val;
            }
            std::thread::yield_now();
        }
    }

    fn http_error(status: u16) -> ClientError {
        ClientError::Http { status, body: String::new() }
    }

    // ─── Mock chat API ───────────────────────────────────────

    #[derive(Default)]
    struct MockChat {
        create_results: RefCell<VecDeque<unibot_types::Result<CreateSessionResponse>>>,
        send_results: RefCell<VecDeque<unibot_types::Result<ChatReply>>>,
        create_calls: Cell<usize>,
        sent: RefCell<Vec<(String, String)>>,
        /// When set, the next send waits for this before answering
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl MockChat {
        fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        fn will_create(&self, id: &str) {
            self.create_results.borrow_mut().push_back(Ok(CreateSessionResponse {
                session_id: id.to_string(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
            }));
        }

        fn will_fail_create(&self) {
            self.create_results
                .borrow_mut()
                .push_back(Err(ClientError::Network("connection refused".to_string())));
        }

        fn will_reply(&self, message_id: &str, response: &str) {
            self.send_results.borrow_mut().push_back(Ok(ChatReply {
                confidence_score: 0.9,
                message_id: message_id.to_string(),
                response: response.to_string(),
            }));
        }

        fn will_fail_send(&self, err: ClientError) {
            self.send_results.borrow_mut().push_back(Err(err));
        }

        fn gate_next_send(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            *self.gate.borrow_mut() = Some(rx);
            tx
        }
    }

    #[async_trait(?Send)]
    impl ChatPort for MockChat {
        async fn create_session(&self) -> unibot_types::Result<CreateSessionResponse> {
            self.create_calls.set(self.create_calls.get() + 1);
            self.create_results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::Network("unscripted".to_string())))
        }

        async fn send_message(
            &self,
            session_id: &str,
            message: &str,
        ) -> unibot_types::Result<ChatReply> {
            self.sent
                .borrow_mut()
                .push((session_id.to_string(), message.to_string()));
            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            self.send_results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::Network("unscripted".to_string())))
        }
    }

    fn chat_with(
        chat: &Rc<MockChat>,
        external: Option<&str>,
    ) -> (ChatController, EventBus) {
        let bus = EventBus::new();
        let controller = ChatController::new(
            chat.clone(),
            bus.clone(),
            external.map(str::to_string),
        );
        (controller, bus)
    }

    // ─── Session Bootstrapper Tests ──────────────────────────

    #[test]
    fn test_bootstrap_creates_session_once() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        let (controller, bus) = chat_with(&chat, None);

        block_on(controller.handle().bootstrap()).unwrap();

        assert_eq!(chat.create_calls.get(), 1);
        let state = controller.state();
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.id, "srv-1");
        assert_eq!(session.created_at, "2026-01-01T00:00:00Z");
        assert_eq!(session.source, SessionSource::Created);
        assert!(!state.bootstrapping);
        assert!(state.error.is_none());
        assert_eq!(
            bus.drain(),
            vec![ClientEvent::SessionReady { session_id: "srv-1".to_string() }]
        );
    }

    #[test]
    fn test_bootstrap_adopts_external_id_without_network() {
        let chat = MockChat::new();
        let (controller, _bus) = chat_with(&chat, Some("abc123"));

        block_on(controller.handle().bootstrap()).unwrap();

        assert_eq!(chat.create_calls.get(), 0);
        let state = controller.state();
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.id, "abc123");
        assert!(session.is_adopted());
        assert!(!session.created_at.is_empty());
    }

    #[test]
    fn test_blank_external_id_is_ignored() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        let (controller, _bus) = chat_with(&chat, Some("   "));
        assert!(controller.state().external_session_id().is_none());

        block_on(controller.handle().bootstrap()).unwrap();
        assert_eq!(chat.create_calls.get(), 1);
    }

    #[test]
    fn test_bootstrap_failure_sets_error() {
        let chat = MockChat::new();
        chat.will_fail_create();
        let (controller, bus) = chat_with(&chat, None);

        let result = block_on(controller.handle().bootstrap());
        assert!(matches!(result, Err(ClientError::Network(_))));

        let state = controller.state();
        assert!(state.session.is_none());
        assert!(!state.bootstrapping);
        assert_eq!(state.error.as_deref(), Some(SESSION_INIT_FAILED));
        assert!(!state.can_submit());
        let events = bus.drain();
        assert!(events.iter().any(|e| matches!(e, ClientEvent::Error { .. })));
    }

    #[test]
    fn test_retry_without_session_bootstraps_again() {
        let chat = MockChat::new();
        chat.will_fail_create();
        chat.will_create("srv-2");
        let (controller, _bus) = chat_with(&chat, None);
        let handle = controller.handle();

        let _ = block_on(handle.bootstrap());
        block_on(handle.retry()).unwrap();

        assert_eq!(chat.create_calls.get(), 2);
        assert_eq!(controller.state().session.as_ref().unwrap().id, "srv-2");
        assert!(controller.state().error.is_none());
    }

    #[test]
    fn test_retry_with_session_only_clears_error() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        chat.will_fail_send(http_error(500));
        let (controller, _bus) = chat_with(&chat, None);
        let handle = controller.handle();

        block_on(handle.bootstrap()).unwrap();
        let _ = block_on(handle.send_exchange("Hello"));
        assert_eq!(controller.state().error.as_deref(), Some(SEND_FAILED));

        block_on(handle.retry()).unwrap();

        assert_eq!(chat.create_calls.get(), 1);
        assert!(controller.state().error.is_none());
        assert_eq!(controller.state().session.as_ref().unwrap().id, "srv-1");
    }

    // ─── Message Exchange Tests ──────────────────────────────

    #[test]
    fn test_send_without_session_fails_fast() {
        let chat = MockChat::new();
        let (controller, _bus) = chat_with(&chat, None);

        let result = block_on(controller.handle().send_exchange("Hello"));

        assert_eq!(result, Err(ClientError::NoSession));
        assert!(chat.sent.borrow().is_empty());
        let state = controller.state();
        assert!(state.transcript.is_empty());
        assert!(!state.busy);
        assert_eq!(state.error.as_deref(), Some(NO_SESSION));
    }

    #[test]
    fn test_send_success_appends_user_then_bot() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        chat.will_reply("m1", "Hi there");
        let (controller, bus) = chat_with(&chat, None);
        let handle = controller.handle();

        block_on(handle.bootstrap()).unwrap();
        let _ = bus.drain();
        block_on(handle.send_exchange("Hello")).unwrap();

        assert_eq!(
            *chat.sent.borrow(),
            vec![("srv-1".to_string(), "Hello".to_string())]
        );
        let state = controller.state();
        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript[0].origin, Origin::User);
        assert_eq!(state.transcript[0].content, "Hello");
        assert_eq!(state.transcript[1].origin, Origin::Bot);
        assert_eq!(state.transcript[1].id, "m1");
        assert_eq!(state.transcript[1].content, "Hi there");
        assert!(!state.busy);
        assert!(state.error.is_none());
        assert_eq!(
            bus.drain(),
            vec![
                ClientEvent::ExchangeStarted,
                ClientEvent::TranscriptUpdated { len: 2 },
            ]
        );
    }

    #[test]
    fn test_send_failure_leaves_transcript_and_allows_resubmit() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        chat.will_fail_send(ClientError::Network("offline".to_string()));
        chat.will_reply("m2", "Back online");
        let (controller, _bus) = chat_with(&chat, None);
        let handle = controller.handle();

        block_on(handle.bootstrap()).unwrap();
        assert!(block_on(handle.send_exchange("Hello")).is_err());

        {
            let state = controller.state();
            assert!(state.transcript.is_empty());
            assert_eq!(state.error.as_deref(), Some(SEND_FAILED));
            assert!(!state.busy);
            assert!(state.can_submit());
        }

        block_on(handle.send_exchange("Hello again")).unwrap();
        let state = controller.state();
        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript[0].content, "Hello again");
        assert!(state.error.is_none());
    }

    #[test]
    fn test_transcript_keeps_insertion_order() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        chat.will_reply("m1", "one");
        chat.will_reply("m2", "two");
        let (controller, _bus) = chat_with(&chat, None);
        let handle = controller.handle();

        block_on(handle.bootstrap()).unwrap();
        block_on(handle.send_exchange("first")).unwrap();
        block_on(handle.send_exchange("second")).unwrap();

        let state = controller.state();
        let contents: Vec<&str> = state.transcript.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "one", "second", "two"]);
        let origins: Vec<Origin> = state.transcript.iter().map(|m| m.origin).collect();
        assert_eq!(origins, vec![Origin::User, Origin::Bot, Origin::User, Origin::Bot]);
    }

    #[test]
    fn test_busy_while_exchange_in_flight() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        chat.will_reply("m1", "Hi there");
        let (controller, _bus) = chat_with(&chat, None);
        let handle = controller.handle();
        block_on(handle.bootstrap()).unwrap();

        let release = chat.gate_next_send();
        let mut fut = Box::pin(handle.send_exchange("Hello"));
        assert!(poll_once(fut.as_mut()).is_pending());
        assert!(controller.state().busy);
        assert!(!controller.can_submit());

        release.send(()).unwrap();
        assert_eq!(poll_once(fut.as_mut()), Poll::Ready(Ok(())));
        assert!(!controller.state().busy);
        assert!(controller.can_submit());
    }

    #[test]
    fn test_completion_after_view_dropped_is_noop() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        chat.will_reply("m1", "Hi there");
        let (controller, bus) = chat_with(&chat, None);
        let handle = controller.handle();
        block_on(handle.bootstrap()).unwrap();
        let _ = bus.drain();

        let release = chat.gate_next_send();
        let mut fut = Box::pin(handle.send_exchange("Hello"));
        assert!(poll_once(fut.as_mut()).is_pending());

        drop(controller);
        release.send(()).unwrap();

        assert_eq!(poll_once(fut.as_mut()), Poll::Ready(Err(ClientError::Detached)));
        let events = bus.drain();
        assert!(!events
            .iter()
            .any(|e| matches!(e, ClientEvent::TranscriptUpdated { .. })));
    }

    #[test]
    fn test_bootstrap_after_view_dropped() {
        let chat = MockChat::new();
        let (controller, _bus) = chat_with(&chat, None);
        let handle = controller.handle();
        drop(controller);

        assert_eq!(block_on(handle.bootstrap()), Err(ClientError::Detached));
        assert_eq!(chat.create_calls.get(), 0);
    }

    // ─── Adopted Session Invalidation ────────────────────────

    #[test]
    fn test_adopted_session_rejected_on_404() {
        let chat = MockChat::new();
        chat.will_fail_send(http_error(404));
        chat.will_create("srv-fresh");
        let (controller, _bus) = chat_with(&chat, Some("stale-id"));
        let handle = controller.handle();

        block_on(handle.bootstrap()).unwrap();
        let result = block_on(handle.send_exchange("Hello"));
        assert_eq!(result.unwrap_err().status(), Some(404));

        {
            let state = controller.state();
            assert!(state.session.is_none());
            assert!(state.external_session_id().is_none());
            assert_eq!(state.error.as_deref(), Some(SESSION_REJECTED));
            assert!(state.transcript.is_empty());
        }

        block_on(handle.retry()).unwrap();
        assert_eq!(chat.create_calls.get(), 1);
        let state = controller.state();
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.id, "srv-fresh");
        assert_eq!(session.source, SessionSource::Created);
    }

    #[test]
    fn test_adopted_session_kept_on_other_errors() {
        let chat = MockChat::new();
        chat.will_fail_send(http_error(500));
        let (controller, _bus) = chat_with(&chat, Some("abc123"));
        let handle = controller.handle();

        block_on(handle.bootstrap()).unwrap();
        let _ = block_on(handle.send_exchange("Hello"));

        let state = controller.state();
        assert_eq!(state.session.as_ref().unwrap().id, "abc123");
        assert_eq!(state.error.as_deref(), Some(SEND_FAILED));
    }

    #[test]
    fn test_created_session_kept_on_404() {
        let chat = MockChat::new();
        chat.will_create("srv-1");
        chat.will_fail_send(http_error(404));
        let (controller, _bus) = chat_with(&chat, None);
        let handle = controller.handle();

        block_on(handle.bootstrap()).unwrap();
        let _ = block_on(handle.send_exchange("Hello"));

        let state = controller.state();
        assert!(state.session.is_some());
        assert_eq!(state.error.as_deref(), Some(SEND_FAILED));
    }

    // ─── Mock document API ───────────────────────────────────

    #[derive(Default)]
    struct MockDocs {
        documents: RefCell<Vec<Document>>,
        fail_list: Cell<bool>,
        fail_delete: Cell<bool>,
        fail_upload: Cell<bool>,
        fail_stats: Cell<bool>,
        stats: RefCell<VectorStats>,
        uploads: RefCell<Vec<(String, Vec<(&'static str, String)>)>>,
        deletes: RefCell<Vec<String>>,
        /// Each upload/delete call waits on the next gate, if any
        gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    }

    impl MockDocs {
        fn with_documents(ids: &[&str]) -> Rc<Self> {
            let docs = Self::default();
            *docs.documents.borrow_mut() = ids.iter().map(|id| document(id)).collect();
            Rc::new(docs)
        }

        fn gate_next_call(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push_back(rx);
            tx
        }

        async fn pass_gate(&self) {
            let gate = self.gates.borrow_mut().pop_front();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
        }
    }

    fn document(id: &str) -> Document {
        Document {
            id: id.to_string(),
            title: format!("Doc {}", id),
            original_filename: format!("{}.pdf", id),
            category: "general".to_string(),
            file_size: 1024,
            is_processed: true,
            chunk_count: 3,
            uploaded_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[async_trait(?Send)]
    impl DocumentPort for MockDocs {
        async fn upload_document(
            &self,
            file: &SelectedFile,
            metadata: &UploadMetadata,
        ) -> unibot_types::Result<UploadResponse> {
            self.uploads
                .borrow_mut()
                .push((file.name.clone(), metadata.form_fields()));
            self.pass_gate().await;
            if self.fail_upload.get() {
                return Err(http_error(500));
            }
            Ok(UploadResponse {
                message: "ok".to_string(),
                document_id: "doc-new".to_string(),
                filename: file.name.clone(),
            })
        }

        async fn list_documents(&self) -> unibot_types::Result<Vec<Document>> {
            if self.fail_list.get() {
                return Err(http_error(503));
            }
            Ok(self.documents.borrow().clone())
        }

        async fn delete_document(&self, document_id: &str) -> unibot_types::Result<DeleteResponse> {
            self.deletes.borrow_mut().push(document_id.to_string());
            self.pass_gate().await;
            if self.fail_delete.get() {
                return Err(http_error(500));
            }
            Ok(DeleteResponse { message: "deleted".to_string() })
        }

        async fn vector_stats(&self) -> unibot_types::Result<VectorStats> {
            if self.fail_stats.get() {
                return Err(ClientError::Timeout(30_000));
            }
            Ok(self.stats.borrow().clone())
        }
    }

    struct MockConfirm {
        answer: bool,
        prompts: RefCell<Vec<String>>,
    }

    impl MockConfirm {
        fn answering(answer: bool) -> Self {
            Self { answer, prompts: RefCell::new(Vec::new()) }
        }
    }

    impl ConfirmPort for MockConfirm {
        fn confirm(&self, prompt: &str) -> bool {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answer
        }
    }

    fn pdf(name: &str, size: usize) -> SelectedFile {
        SelectedFile::new(name, PDF_MIME_TYPE, vec![0u8; size])
    }

    // ─── Upload Validation Tests ─────────────────────────────

    #[test]
    fn test_validate_rejects_oversized_pdf() {
        let result = validate_file(&pdf("big.pdf", 15 * MIB));
        assert!(matches!(result, Err(UploadRejection::TooLarge { .. })));
    }

    #[test]
    fn test_validate_rejects_non_pdf_of_any_size() {
        for size in [0, 1024, 15 * MIB] {
            let file = SelectedFile::new("notes.txt", "text/plain", vec![0u8; size]);
            assert!(matches!(
                validate_file(&file),
                Err(UploadRejection::NotPdf { .. })
            ));
        }
    }

    #[test]
    fn test_validate_accepts_limit_exactly() {
        assert!(validate_file(&pdf("edge.pdf", 10 * MIB)).is_ok());
        assert!(validate_file(&pdf("over.pdf", 10 * MIB + 1)).is_err());
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("handbook.pdf"), "handbook");
        assert_eq!(title_from_filename("Catalog.PDF"), "Catalog");
        assert_eq!(title_from_filename("notes"), "notes");
        assert_eq!(title_from_filename(".pdf"), "");
    }

    #[test]
    fn test_select_oversized_file_blocks_upload() {
        let docs = MockDocs::with_documents(&[]);
        let controller = UploadController::new(docs.clone(), EventBus::new());

        let result = controller.select_file(pdf("big.pdf", 15 * MIB));
        assert!(matches!(result, Err(UploadRejection::TooLarge { .. })));
        {
            let form = controller.form();
            assert!(form.file.is_none());
            assert_eq!(
                form.status,
                UploadStatus::Error("File size must be less than 10MB.".to_string())
            );
            assert!(!form.can_upload());
        }

        assert_eq!(block_on(controller.handle().upload()), Ok(None));
        assert!(docs.uploads.borrow().is_empty());
    }

    #[test]
    fn test_select_non_pdf_sets_type_error() {
        let docs = MockDocs::with_documents(&[]);
        let controller = UploadController::new(docs.clone(), EventBus::new());

        let file = SelectedFile::new("photo.png", "image/png", vec![0u8; 10]);
        assert!(controller.select_file(file).is_err());
        assert_eq!(
            controller.form().status.message(),
            Some("Only PDF files are allowed.")
        );
        assert!(docs.uploads.borrow().is_empty());
    }

    #[test]
    fn test_invalid_file_set_directly_never_reaches_network() {
        let docs = MockDocs::with_documents(&[]);
        let controller = UploadController::new(docs.clone(), EventBus::new());
        controller.edit(|form| form.file = Some(pdf("big.pdf", 15 * MIB)));

        let result = block_on(controller.handle().upload());
        assert!(matches!(
            result,
            Err(ClientError::Validation(UploadRejection::TooLarge { .. }))
        ));
        assert!(docs.uploads.borrow().is_empty());
    }

    #[test]
    fn test_valid_pdf_uploads_with_non_empty_metadata() {
        let docs = MockDocs::with_documents(&[]);
        let bus = EventBus::new();
        let controller = UploadController::new(docs.clone(), bus.clone());

        controller.select_file(pdf("handbook.pdf", 5 * MIB)).unwrap();
        assert_eq!(controller.form().metadata.title, "handbook");
        controller.edit(|form| form.metadata.category = Category::Admissions);

        let resp = block_on(controller.handle().upload()).unwrap().unwrap();
        assert_eq!(resp.filename, "handbook.pdf");

        let uploads = docs.uploads.borrow();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "handbook.pdf");
        assert_eq!(
            uploads[0].1,
            vec![
                ("title", "handbook".to_string()),
                ("category", "admissions".to_string()),
            ]
        );

        let form = controller.form();
        assert!(form.file.is_none());
        assert_eq!(form.metadata, UploadMetadata::default());
        assert_eq!(
            form.status,
            UploadStatus::Success("Successfully uploaded: handbook.pdf".to_string())
        );
        assert_eq!(
            bus.drain(),
            vec![ClientEvent::DocumentUploaded {
                document_id: "doc-new".to_string(),
                filename: "handbook.pdf".to_string(),
            }]
        );
    }

    #[test]
    fn test_select_keeps_user_title() {
        let docs = MockDocs::with_documents(&[]);
        let controller = UploadController::new(docs, EventBus::new());
        controller.edit(|form| form.metadata.title = "Fall Catalog".to_string());

        controller.select_file(pdf("catalog-2026.pdf", 100)).unwrap();
        assert_eq!(controller.form().metadata.title, "Fall Catalog");
    }

    #[test]
    fn test_upload_failure_keeps_file() {
        let docs = MockDocs::with_documents(&[]);
        docs.fail_upload.set(true);
        let controller = UploadController::new(docs.clone(), EventBus::new());
        controller.select_file(pdf("handbook.pdf", 100)).unwrap();

        assert!(block_on(controller.handle().upload()).is_err());

        let form = controller.form();
        assert!(form.file.is_some());
        assert_eq!(form.status, UploadStatus::Error(UPLOAD_FAILED.to_string()));
        assert!(form.can_upload());
    }

    #[test]
    fn test_upload_without_file_is_noop() {
        let docs = MockDocs::with_documents(&[]);
        let controller = UploadController::new(docs.clone(), EventBus::new());
        assert_eq!(block_on(controller.handle().upload()), Ok(None));
        assert!(docs.uploads.borrow().is_empty());
    }

    #[test]
    fn test_select_while_uploading_changes_nothing() {
        let mut form = UploadForm::default();
        form.select_file(pdf("a.pdf", 10)).unwrap();
        form.status = UploadStatus::Uploading;
        let before = form.clone();

        assert_eq!(form.select_file(pdf("b.pdf", 10)), Err(UploadRejection::UploadInProgress));
        let text = SelectedFile::new("notes.txt", "text/plain", vec![1]);
        assert_eq!(form.select_file(text), Err(UploadRejection::UploadInProgress));
        assert_eq!(form, before);
    }

    #[test]
    fn test_file_dropped_during_upload_is_not_selected() {
        let docs = MockDocs::with_documents(&[]);
        let controller = UploadController::new(docs.clone(), EventBus::new());
        controller.select_file(pdf("a.pdf", 100)).unwrap();

        let release = docs.gate_next_call();
        let handle = controller.handle();
        let mut first = Box::pin(handle.upload());
        assert!(poll_once(first.as_mut()).is_pending());
        assert!(controller.form().is_uploading());

        assert_eq!(
            controller.select_file(pdf("b.pdf", 100)),
            Err(UploadRejection::UploadInProgress)
        );
        {
            let form = controller.form();
            assert_eq!(form.file.as_ref().map(|f| f.name.as_str()), Some("a.pdf"));
            assert_eq!(form.status, UploadStatus::Uploading);
            assert!(!form.can_upload());
        }

        // A second submit while the first is in flight sends nothing
        assert_eq!(block_on(handle.upload()), Ok(None));
        assert_eq!(docs.uploads.borrow().len(), 1);

        release.send(()).unwrap();
        assert!(matches!(poll_once(first.as_mut()), Poll::Ready(Ok(Some(_)))));
        assert_eq!(docs.uploads.borrow().len(), 1);
        assert_eq!(
            controller.form().status,
            UploadStatus::Success("Successfully uploaded: a.pdf".to_string())
        );
    }

    #[test]
    fn test_upload_form_reset() {
        let mut form = UploadForm::default();
        form.select_file(pdf("a.pdf", 10)).unwrap();
        form.metadata.description = "desc".to_string();
        form.reset();
        assert_eq!(form, UploadForm::default());
        assert_eq!(form.status.message(), None);
    }

    // ─── Document List Tests ─────────────────────────────────

    #[test]
    fn test_document_list_starts_loading() {
        let docs = MockDocs::with_documents(&[]);
        let controller = DocumentListController::new(docs, EventBus::new());
        assert!(controller.state().loading);
    }

    #[test]
    fn test_document_list_refresh() {
        let docs = MockDocs::with_documents(&["a", "b"]);
        let controller = DocumentListController::new(docs, EventBus::new());

        block_on(controller.handle().refresh()).unwrap();

        let state = controller.state();
        assert!(!state.loading);
        assert_eq!(state.documents.len(), 2);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_document_list_refresh_failure() {
        let docs = MockDocs::with_documents(&["a"]);
        docs.fail_list.set(true);
        let controller = DocumentListController::new(docs, EventBus::new());

        assert!(block_on(controller.handle().refresh()).is_err());

        let state = controller.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(FETCH_DOCUMENTS_FAILED));
    }

    #[test]
    fn test_delete_removes_exactly_matching_entry() {
        let docs = MockDocs::with_documents(&["a", "b", "c"]);
        let bus = EventBus::new();
        let controller = DocumentListController::new(docs.clone(), bus.clone());
        let handle = controller.handle();
        block_on(handle.refresh()).unwrap();

        let confirm = MockConfirm::answering(true);
        let deleted = block_on(handle.delete("b", "Doc b", &confirm)).unwrap();

        assert!(deleted);
        assert_eq!(*docs.deletes.borrow(), vec!["b".to_string()]);
        assert_eq!(*confirm.prompts.borrow(), vec![delete_prompt("Doc b")]);
        let ids: Vec<String> = controller
            .state()
            .documents
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "c".to_string()]);
        assert!(controller.state().deleting.is_empty());
        assert_eq!(
            bus.drain(),
            vec![ClientEvent::DocumentDeleted { document_id: "b".to_string() }]
        );
    }

    #[test]
    fn test_delete_declined_issues_no_call() {
        let docs = MockDocs::with_documents(&["a"]);
        let controller = DocumentListController::new(docs.clone(), EventBus::new());
        let handle = controller.handle();
        block_on(handle.refresh()).unwrap();

        let deleted = block_on(handle.delete("a", "Doc a", &MockConfirm::answering(false))).unwrap();

        assert!(!deleted);
        assert!(docs.deletes.borrow().is_empty());
        assert_eq!(controller.state().documents.len(), 1);
    }

    #[test]
    fn test_delete_failure_keeps_entry() {
        let docs = MockDocs::with_documents(&["a"]);
        docs.fail_delete.set(true);
        let controller = DocumentListController::new(docs.clone(), EventBus::new());
        let handle = controller.handle();
        block_on(handle.refresh()).unwrap();

        assert!(block_on(handle.delete("a", "Doc a", &MockConfirm::answering(true))).is_err());

        let state = controller.state();
        assert_eq!(state.documents.len(), 1);
        assert_eq!(state.error.as_deref(), Some(DELETE_FAILED));
        assert!(state.deleting.is_empty());
    }

    #[test]
    fn test_concurrent_deletes_track_each_row() {
        let docs = MockDocs::with_documents(&["a", "b", "c"]);
        let controller = DocumentListController::new(docs.clone(), EventBus::new());
        let handle = controller.handle();
        block_on(handle.refresh()).unwrap();
        let confirm = MockConfirm::answering(true);

        let release_a = docs.gate_next_call();
        let release_b = docs.gate_next_call();
        let mut delete_a = Box::pin(handle.delete("a", "Doc a", &confirm));
        let mut delete_b = Box::pin(handle.delete("b", "Doc b", &confirm));
        assert!(poll_once(delete_a.as_mut()).is_pending());
        assert!(poll_once(delete_b.as_mut()).is_pending());
        assert!(controller.state().is_deleting("a"));
        assert!(controller.state().is_deleting("b"));

        // Same row again: refused before prompting
        let prompts = confirm.prompts.borrow().len();
        assert_eq!(block_on(handle.delete("b", "Doc b", &confirm)), Ok(false));
        assert_eq!(confirm.prompts.borrow().len(), prompts);

        release_a.send(()).unwrap();
        assert_eq!(poll_once(delete_a.as_mut()), Poll::Ready(Ok(true)));
        assert!(!controller.state().is_deleting("a"));
        assert!(controller.state().is_deleting("b"));

        release_b.send(()).unwrap();
        assert_eq!(poll_once(delete_b.as_mut()), Poll::Ready(Ok(true)));

        let state = controller.state();
        assert!(state.deleting.is_empty());
        let ids: Vec<&str> = state.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert_eq!(*docs.deletes.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_delete_prompt_text() {
        assert_eq!(
            delete_prompt("Handbook"),
            "Are you sure you want to delete \"Handbook\"?"
        );
    }

    // ─── Dashboard Tests ─────────────────────────────────────

    fn stats(total: u64, processed: u64, unprocessed: u64) -> VectorStats {
        VectorStats {
            vector_database: VectorDatabaseStats { total_chunks: 120 },
            database: DatabaseStats {
                total_documents: total,
                processed_documents: processed,
                unprocessed_documents: unprocessed,
            },
        }
    }

    #[test]
    fn test_processing_percent() {
        assert_eq!(processing_percent(&stats(0, 0, 0)), 0);
        assert_eq!(processing_percent(&stats(3, 2, 1)), 67);
        assert_eq!(processing_percent(&stats(4, 4, 0)), 100);
        assert_eq!(processing_fraction(&stats(0, 0, 0)), 0.0);
        assert!((processing_fraction(&stats(4, 1, 3)) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pipeline_status() {
        assert_eq!(pipeline_status(&stats(4, 4, 0)), PipelineStatus::Idle);
        assert_eq!(pipeline_status(&stats(4, 3, 1)), PipelineStatus::Active);
        assert_eq!(PipelineStatus::Active.label(), "Active");
    }

    #[test]
    fn test_stats_refresh() {
        let docs = MockDocs::with_documents(&[]);
        *docs.stats.borrow_mut() = stats(10, 7, 3);
        let controller = StatsController::new(docs);
        assert!(controller.state().loading);

        block_on(controller.handle().refresh()).unwrap();

        let state = controller.state();
        assert!(!state.loading);
        assert_eq!(state.stats, Some(stats(10, 7, 3)));
    }

    #[test]
    fn test_stats_refresh_failure() {
        let docs = MockDocs::with_documents(&[]);
        docs.fail_stats.set(true);
        let controller = StatsController::new(docs);

        assert!(block_on(controller.handle().refresh()).is_err());

        let state = controller.state();
        assert!(!state.loading);
        assert!(state.stats.is_none());
        assert_eq!(state.error.as_deref(), Some(FETCH_STATS_FAILED));
    }

    // ─── Health Tests ────────────────────────────────────────

    struct MockHealth(bool);

    #[async_trait(?Send)]
    impl HealthPort for MockHealth {
        async fn health_check(&self) -> unibot_types::Result<HealthResponse> {
            if self.0 {
                Ok(HealthResponse {
                    status: "healthy".to_string(),
                    timestamp: "2026-01-01T00:00:00Z".to_string(),
                })
            } else {
                Err(ClientError::Network("down".to_string()))
            }
        }
    }

    #[test]
    fn test_health_probe() {
        assert_eq!(
            block_on(probe(&MockHealth(true))),
            ApiStatus::Online { status: "healthy".to_string() }
        );
        assert_eq!(block_on(probe(&MockHealth(false))), ApiStatus::Unreachable);
        assert_eq!(ApiStatus::Unreachable.label(), "API: unreachable");
    }

    // ─── View / EventBus Tests ───────────────────────────────

    #[test]
    fn test_view_ref_detaches_on_drop() {
        let view = ViewState::new(1u32);
        let weak = view.downgrade();
        assert!(weak.is_attached());
        assert_eq!(weak.update(|v| { *v += 1; *v }), Ok(2));
        assert_eq!(*view.borrow(), 2);

        drop(view);
        assert!(!weak.is_attached());
        assert_eq!(weak.update(|v| *v), Err(ClientError::Detached));
    }

    #[test]
    fn test_event_bus_emit_and_drain() {
        let bus = EventBus::new();
        assert!(!bus.has_pending());
        bus.emit(ClientEvent::ExchangeStarted);
        bus.emit(ClientEvent::TranscriptUpdated { len: 2 });
        assert!(bus.has_pending());
        assert_eq!(bus.drain().len(), 2);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();
        bus1.emit(ClientEvent::ExchangeStarted);
        assert!(bus2.has_pending());
        assert_eq!(bus2.drain().len(), 1);
        assert!(!bus1.has_pending());
    }

    #[test]
    fn test_event_bus_take_pending_only_when_queued() {
        let bus = EventBus::new();
        assert_eq!(bus.take_pending(), None);

        // Unmounted mid-upload: the settled request queues nothing
        let docs = MockDocs::with_documents(&[]);
        let controller = UploadController::new(docs.clone(), bus.clone());
        controller.select_file(pdf("a.pdf", 100)).unwrap();
        let handle = controller.handle();
        let release = docs.gate_next_call();
        let mut upload = Box::pin(handle.upload());
        assert!(poll_once(upload.as_mut()).is_pending());
        drop(controller);
        release.send(()).unwrap();
        assert_eq!(poll_once(upload.as_mut()), Poll::Ready(Err(ClientError::Detached)));

        assert_eq!(bus.take_pending(), None);
        bus.emit(ClientEvent::DocumentDeleted { document_id: "d1".to_string() });
        assert_eq!(bus.take_pending().map(|events| events.len()), Some(1));
        assert!(!bus.has_pending());
    }
}
