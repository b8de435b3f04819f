use crate::actions::{print_pdf, save_download};
use crate::client::ResultClient;
use crate::config::ViewArgs;
use crate::decoder::{decode_attachment, BlobStore, RenderSource, Signature};
use crate::error::{ActionError, RenderError};
use crate::image_pipeline::ImagePipeline;
use crate::message::{Message, Ticket};
use crate::model::{AttachmentKind, AttachmentView, ItemDisplay, PageView, ResultRecord};
use crate::pdf::{DocumentKey, PdfiumRasterizer, RenderWorker, RenderedPage, ZoomLevel};
use crate::views::{attachment_list, patient_panel};
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, scrollable, text};
use iced::{application, window, Alignment, Element, Length, Task, Theme};

const APP_TITLE: &str = "Kết quả cận lâm sàng";
const FOOTER: &str = "© Bệnh viện ABC - Liên hệ 1900 1234 nếu cần hỗ trợ";

pub fn run(args: ViewArgs) -> iced::Result {
    application(APP_TITLE, App::update, App::view)
        .theme(App::theme)
        .window_size((960.0, 1000.0))
        .run_with(move || App::new(args))
}

#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(ResultRecord),
    Error(String),
}

pub struct App {
    client: Result<ResultClient, String>,
    worker: RenderWorker,
    blobs: BlobStore,
    state: LoadState,
    items: Vec<AttachmentView>,
    session: u64,
    pixel_ratio: f32,
    pixel_ratio_fixed: bool,
    status: Option<String>,
}

impl App {
    pub fn new(args: ViewArgs) -> (Self, Task<Message>) {
        let client = ResultClient::new(&args.endpoint, args.timeout()).map_err(|err| {
            log::error!("{err}");
            err.to_string()
        });
        let library = args.pdfium_library.clone();
        let worker = RenderWorker::spawn(move || PdfiumRasterizer::bind(library.as_deref()));

        let (app, load) = Self::with_parts(client, worker, args.pixel_ratio);
        let detect = if app.pixel_ratio_fixed {
            Task::none()
        } else {
            window::get_oldest()
                .and_then(window::get_scale_factor)
                .map(Message::PixelRatioDetected)
        };
        (app, Task::batch([load, detect]))
    }

    pub fn with_parts(
        client: Result<ResultClient, String>,
        worker: RenderWorker,
        pixel_ratio: Option<f32>,
    ) -> (Self, Task<Message>) {
        let mut app = Self {
            client,
            worker,
            blobs: BlobStore::default(),
            state: LoadState::Loading,
            items: Vec::new(),
            session: 0,
            pixel_ratio: pixel_ratio.unwrap_or(1.0),
            pixel_ratio_fixed: pixel_ratio.is_some(),
            status: None,
        };
        let load = app.start_load();
        (app, load)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Reload => self.start_load(),
            Message::RecordLoaded { session, result } => {
                if session != self.session {
                    log::debug!("Ignoring result of replaced load {session}");
                    return Task::none();
                }
                match result {
                    Ok(record) => self.mount(record),
                    Err(err) => {
                        log::error!("Loading results failed: {err}");
                        self.state = LoadState::Error(err);
                        Task::none()
                    }
                }
            }
            Message::PixelRatioDetected(ratio) => {
                if self.pixel_ratio_fixed || (ratio - self.pixel_ratio).abs() < f32::EPSILON {
                    return Task::none();
                }
                log::info!("Rendering PDFs for pixel ratio {ratio}");
                self.pixel_ratio = ratio;
                let pdfs: Vec<usize> = (0..self.items.len())
                    .filter(|&index| self.items[index].kind() == Some(AttachmentKind::Pdf))
                    .collect();
                Task::batch(pdfs.into_iter().map(|index| self.show_item(index)))
            }
            Message::AttachmentFetched { ticket, result } => {
                if !self.is_current(ticket) {
                    return Task::none();
                }
                match result {
                    Ok(bytes) => {
                        let item = &mut self.items[ticket.index];
                        let sniffed = Signature::sniff(&bytes);
                        if sniffed != Signature::Unknown {
                            if let Some(renderable) = item.renderable.as_mut() {
                                renderable.kind = sniffed.kind();
                            }
                        }
                        item.bytes = Some(bytes);
                        self.show_item(ticket.index)
                    }
                    Err(err) => {
                        log::warn!("Fetching attachment {} failed: {err}", ticket.index + 1);
                        self.items[ticket.index].display =
                            ItemDisplay::Failed(format!("Không thể tải tệp kết quả ({err})"));
                        Task::none()
                    }
                }
            }
            Message::PagesRendered { ticket, result } => {
                if !self.is_current(ticket) {
                    log::debug!("Dropping stale render of attachment {}", ticket.index + 1);
                    return Task::none();
                }
                self.items[ticket.index].display = match result.and_then(page_views) {
                    Ok(pages) => ItemDisplay::Pages(pages),
                    Err(err) => ItemDisplay::Failed(format!("Không thể hiển thị PDF ({err})")),
                };
                Task::none()
            }
            Message::ZoomIn(index) => self.zoom(index, ZoomLevel::zoom_in),
            Message::ZoomOut(index) => self.zoom(index, ZoomLevel::zoom_out),
            Message::Download(index) => {
                let Some(item) = self.items.get(index) else {
                    return Task::none();
                };
                match item.download_payload() {
                    Ok((file_name, bytes)) => Task::perform(
                        save_download(file_name, bytes),
                        |result| Message::DownloadFinished(result.map_err(|err| err.to_string())),
                    ),
                    Err(err) => {
                        self.status = Some(format!(
                            "Không thể tải xuống \"{}\": {}",
                            item.name,
                            unavailable_reason(&err)
                        ));
                        Task::none()
                    }
                }
            }
            Message::DownloadFinished(result) => {
                self.status = match result {
                    Ok(Some(path)) => Some(format!("Đã lưu {}", path.display())),
                    Ok(None) => None,
                    Err(err) => {
                        log::error!("Download failed: {err}");
                        Some(format!("Tải xuống thất bại ({err})"))
                    }
                };
                Task::none()
            }
            Message::Print(index) => {
                let Some(item) = self.items.get(index) else {
                    return Task::none();
                };
                match item.print_payload() {
                    Ok((file_name, bytes)) => Task::perform(
                        print_pdf(file_name, bytes),
                        |result| Message::PrintFinished(result.map_err(|err| err.to_string())),
                    ),
                    Err(err) => {
                        self.status = Some(format!(
                            "Không thể in \"{}\": {}",
                            item.name,
                            unavailable_reason(&err)
                        ));
                        Task::none()
                    }
                }
            }
            Message::PrintFinished(result) => {
                self.status = match result {
                    Ok(()) => Some(String::from("Đã gửi lệnh in")),
                    Err(err) => {
                        log::error!("Printing failed: {err}");
                        Some(format!("In thất bại ({err})"))
                    }
                };
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = text("KẾT QUẢ CẬN LÂM SÀNG").size(24);

        let body: Element<'_, Message> = match &self.state {
            LoadState::Loading => centered(text("Đang tải kết quả...")),
            LoadState::Error(err) => centered(
                column![
                    text(err).wrapping(Wrapping::Word),
                    button("Tải lại").on_press(Message::Reload),
                ]
                .spacing(12)
                .align_x(Alignment::Center),
            ),
            LoadState::Ready(record) => {
                let mut content = column![
                    patient_panel(record),
                    attachment_list(&self.items),
                ]
                .spacing(24)
                .width(Length::Fill);

                if let Some(status) = &self.status {
                    content = content.push(text(status).size(14).wrapping(Wrapping::Word));
                }

                scrollable(content.padding(4)).height(Length::Fill).into()
            }
        };

        column![title, body, text(FOOTER).size(12)]
            .padding(20)
            .spacing(20)
            .align_x(Alignment::Center)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    fn start_load(&mut self) -> Task<Message> {
        self.release();
        self.session += 1;
        self.state = LoadState::Loading;
        self.status = None;

        let client = match &self.client {
            Ok(client) => client.clone(),
            Err(err) => {
                self.state = LoadState::Error(err.clone());
                return Task::none();
            }
        };

        let session = self.session;
        Task::perform(load_record(client), move |result| Message::RecordLoaded {
            session,
            result,
        })
    }

    fn mount(&mut self, record: ResultRecord) -> Task<Message> {
        self.items = record
            .results
            .iter()
            .map(|item| AttachmentView::new(item, decode_attachment(item, &mut self.blobs)))
            .collect();
        self.state = LoadState::Ready(record);

        let tasks: Vec<_> = (0..self.items.len())
            .map(|index| self.prepare_item(index))
            .collect();
        Task::batch(tasks)
    }

    fn zoom(&mut self, index: usize, step: fn(ZoomLevel) -> ZoomLevel) -> Task<Message> {
        let Some(item) = self.items.get_mut(index) else {
            return Task::none();
        };
        let zoom = step(item.zoom);
        if zoom == item.zoom {
            return Task::none();
        }
        item.zoom = zoom;
        // Images only change display size; PDFs are rasterized again.
        if item.kind() == Some(AttachmentKind::Pdf) && item.bytes.is_some() {
            self.show_item(index)
        } else {
            Task::none()
        }
    }

    fn prepare_item(&mut self, index: usize) -> Task<Message> {
        let item = &mut self.items[index];
        let Some(renderable) = &item.renderable else {
            return Task::none();
        };

        if let Some(bytes) = renderable.inline_bytes(&self.blobs) {
            item.bytes = Some(bytes);
            return self.show_item(index);
        }

        let RenderSource::Remote(reference) = &renderable.source else {
            item.display = ItemDisplay::Failed(String::from("Nội dung kết quả không còn khả dụng"));
            return Task::none();
        };
        let client = match &self.client {
            Ok(client) => client.clone(),
            Err(err) => {
                item.display = ItemDisplay::Failed(err.clone());
                return Task::none();
            }
        };

        let reference = reference.clone();
        item.generation += 1;
        let ticket = Ticket {
            session: self.session,
            index,
            generation: item.generation,
        };
        Task::perform(
            async move { client.fetch_attachment(&reference).await },
            move |result| Message::AttachmentFetched {
                ticket,
                result: result.map_err(|err| err.to_string()),
            },
        )
    }

    fn show_item(&mut self, index: usize) -> Task<Message> {
        let item = &mut self.items[index];
        let Some(bytes) = item.bytes.clone() else {
            return Task::none();
        };

        match item.kind() {
            Some(AttachmentKind::Image) => {
                item.display = match ImagePipeline::decode(&bytes) {
                    Ok(image) => ItemDisplay::Image(image),
                    Err(err) => {
                        log::warn!("Attachment {}: {err}", index + 1);
                        ItemDisplay::Failed(format!("Không thể hiển thị ảnh ({err})"))
                    }
                };
                Task::none()
            }
            Some(AttachmentKind::Pdf) => {
                item.generation += 1;
                let scale = item.zoom.scale();
                let ticket = self.ticket(index);
                let key = DocumentKey {
                    session: ticket.session,
                    index,
                };
                let worker = self.worker.clone();
                let pixel_ratio = self.pixel_ratio;

                Task::perform(
                    async move { worker.render(key, bytes, scale, pixel_ratio).await },
                    move |result: Result<Vec<RenderedPage>, RenderError>| Message::PagesRendered {
                        ticket,
                        result: result.map_err(|err| err.to_string()),
                    },
                )
            }
            None => Task::none(),
        }
    }

    fn ticket(&self, index: usize) -> Ticket {
        Ticket {
            session: self.session,
            index,
            generation: self.items[index].generation,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.session == self.session
            && self
                .items
                .get(ticket.index)
                .is_some_and(|item| item.generation == ticket.generation)
    }

    fn release(&mut self) {
        if self.session > 0 {
            self.worker.evict_session(self.session);
        }
        self.items.clear();
        self.blobs.revoke_all();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.release();
    }
}

async fn load_record(client: ResultClient) -> Result<ResultRecord, String> {
    client
        .fetch_record()
        .await
        .map_err(|err| format!("Không thể tải kết quả ({err})"))
}

fn page_views(pages: Vec<RenderedPage>) -> Result<Vec<PageView>, String> {
    pages
        .into_iter()
        .map(|page| {
            ImagePipeline::page_handle(page.pixel_width, page.pixel_height, page.rgba).map(
                |handle| PageView {
                    handle,
                    display_width: page.display_width,
                    display_height: page.display_height,
                },
            )
        })
        .collect()
}

fn unavailable_reason(err: &ActionError) -> &'static str {
    match err {
        ActionError::NotLoaded => "kết quả chưa tải xong",
        ActionError::NotPrintable => "chỉ in được kết quả PDF",
        ActionError::Io(_) | ActionError::PrintCommand(_) => "thao tác thất bại",
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::samples::SAMPLE_PDF;
    use crate::fixture::sample_record;
    use crate::model::ResultItem;
    use base64::Engine;
    use std::time::Duration;

    fn offline_app() -> App {
        app_with_ratio(Some(1.0))
    }

    fn app_with_ratio(pixel_ratio: Option<f32>) -> App {
        let client = ResultClient::new("http://127.0.0.1:9/api/result", Duration::from_secs(1))
            .map_err(|err| err.to_string());
        let worker = RenderWorker::spawn(|| -> Result<PdfiumRasterizer, RenderError> {
            Err(RenderError::Unavailable("not bound in tests".to_string()))
        });
        let (app, _) = App::with_parts(client, worker, pixel_ratio);
        app
    }

    fn remote_item(name: &str, content: &str, kind: AttachmentKind) -> ResultItem {
        ResultItem {
            name: name.to_string(),
            content: content.to_string(),
            kind,
        }
    }

    fn record(results: Vec<ResultItem>) -> ResultRecord {
        ResultRecord {
            results,
            ..sample_record()
        }
    }

    fn pdf_item(name: &str) -> ResultItem {
        ResultItem {
            name: name.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(b"%PDF-1.4\n%%EOF"),
            kind: AttachmentKind::Pdf,
        }
    }

    fn load(app: &mut App, record: ResultRecord) {
        let session = app.session;
        let _ = app.update(Message::RecordLoaded {
            session,
            result: Ok(record),
        });
    }

    fn fake_page() -> RenderedPage {
        RenderedPage {
            pixel_width: 2,
            pixel_height: 2,
            display_width: 2.0,
            display_height: 2.0,
            rgba: vec![0; 16],
        }
    }

    #[test]
    fn test_pdf_result_mounts_viewer_with_download_name() {
        let mut app = offline_app();
        assert!(matches!(&app.state, LoadState::Loading));

        load(&mut app, record(vec![pdf_item("Xét nghiệm máu")]));

        assert!(matches!(&app.state, LoadState::Ready(_)));
        assert_eq!(app.items.len(), 1);
        let item = &app.items[0];
        assert_eq!(item.kind(), Some(AttachmentKind::Pdf));
        assert_eq!(item.download_name().as_deref(), Some("Xét_nghiệm_máu.pdf"));
        assert_eq!(item.bytes.as_deref().map(<[u8]>::len), Some(14));
        assert!(item.is_printable());
        assert_eq!(app.blobs.len(), 1);
    }

    #[test]
    fn test_failed_fetch_shows_error_without_viewers() {
        let mut app = offline_app();
        let session = app.session;

        let _ = app.update(Message::RecordLoaded {
            session,
            result: Err("Không thể tải kết quả (server answered 500 Internal Server Error)"
                .to_string()),
        });

        assert!(matches!(&app.state, LoadState::Error(msg) if msg.contains("500")));
        assert!(app.items.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_puts_viewer_in_error_state() {
        use axum::http::StatusCode;
        use axum::routing::get;
        use axum::Router;

        let router = Router::new().route(
            crate::fixture::RESULT_ROUTE,
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = ResultClient::new(
            &format!("http://{addr}{}", crate::fixture::RESULT_ROUTE),
            Duration::from_secs(5),
        )
        .unwrap();
        let mut app = offline_app();
        let session = app.session;

        let result = load_record(client).await;
        let _ = app.update(Message::RecordLoaded { session, result });

        assert!(matches!(
            &app.state,
            LoadState::Error(msg) if msg.starts_with("Không thể tải kết quả") && msg.contains("500")
        ));
        assert!(app.items.is_empty());
        assert!(app.blobs.is_empty());
    }

    #[test]
    fn test_result_of_replaced_load_is_ignored() {
        let mut app = offline_app();
        let stale = app.session;
        let _ = app.update(Message::Reload);

        let _ = app.update(Message::RecordLoaded {
            session: stale,
            result: Ok(sample_record()),
        });

        assert!(matches!(&app.state, LoadState::Loading));
        assert!(app.items.is_empty());
    }

    #[test]
    fn test_reload_releases_object_urls() {
        let mut app = offline_app();
        load(&mut app, sample_record());
        assert_eq!(app.blobs.len(), 2);

        let _ = app.update(Message::Reload);

        assert!(app.blobs.is_empty());
        assert!(app.items.is_empty());
        assert!(matches!(&app.state, LoadState::Loading));
    }

    #[test]
    fn test_bad_attachment_does_not_block_others() {
        let mut app = offline_app();
        let broken = ResultItem {
            name: "Hỏng".to_string(),
            content: "***".to_string(),
            kind: AttachmentKind::Pdf,
        };
        load(&mut app, record(vec![broken, pdf_item("Tốt")]));

        assert!(matches!(app.items[0].display, ItemDisplay::Failed(_)));
        assert!(matches!(app.items[1].display, ItemDisplay::Loading));
        assert_eq!(app.items[1].generation, 1);
    }

    #[test]
    fn test_rendered_pages_are_shown() {
        let mut app = offline_app();
        load(&mut app, record(vec![pdf_item("A")]));
        let ticket = app.ticket(0);

        let _ = app.update(Message::PagesRendered {
            ticket,
            result: Ok(vec![fake_page(), fake_page()]),
        });

        assert!(matches!(&app.items[0].display, ItemDisplay::Pages(pages) if pages.len() == 2));
    }

    #[test]
    fn test_render_failure_becomes_item_fallback() {
        let mut app = offline_app();
        load(&mut app, record(vec![pdf_item("A")]));
        let ticket = app.ticket(0);

        let _ = app.update(Message::PagesRendered {
            ticket,
            result: Err("PDF renderer unavailable".to_string()),
        });

        assert!(matches!(
            &app.items[0].display,
            ItemDisplay::Failed(msg) if msg.contains("unavailable")
        ));
    }

    #[test]
    fn test_zoom_rerenders_and_drops_stale_pages() {
        let mut app = offline_app();
        load(&mut app, record(vec![pdf_item("A")]));
        let before = app.ticket(0);

        let _ = app.update(Message::ZoomIn(0));
        assert_eq!(app.items[0].zoom.scale(), 1.25);
        assert_eq!(app.items[0].generation, before.generation + 1);

        let _ = app.update(Message::PagesRendered {
            ticket: before,
            result: Ok(vec![fake_page()]),
        });
        assert!(matches!(app.items[0].display, ItemDisplay::Loading));
    }

    #[test]
    fn test_zoom_is_bounded_per_item() {
        let mut app = offline_app();
        load(&mut app, record(vec![pdf_item("A"), pdf_item("B")]));

        for _ in 0..20 {
            let _ = app.update(Message::ZoomIn(0));
            let _ = app.update(Message::ZoomOut(1));
        }

        assert_eq!(app.items[0].zoom.scale(), 3.0);
        assert_eq!(app.items[1].zoom.scale(), 0.5);
        let _ = app.update(Message::ZoomIn(7));
    }

    #[test]
    fn test_remote_attachment_is_sniffed_after_fetch() {
        let mut app = offline_app();
        let remote = ResultItem {
            name: "Ảnh".to_string(),
            content: "/files/scan.bin".to_string(),
            kind: AttachmentKind::Image,
        };
        load(&mut app, record(vec![remote]));
        let ticket = app.ticket(0);
        assert!(app.items[0].bytes.is_none());

        let pdf = base64::engine::general_purpose::STANDARD
            .decode(SAMPLE_PDF)
            .unwrap();
        let _ = app.update(Message::AttachmentFetched {
            ticket,
            result: Ok(pdf.into()),
        });

        let item = &app.items[0];
        assert_eq!(item.kind(), Some(AttachmentKind::Pdf));
        assert_eq!(item.download_name().as_deref(), Some("Ảnh.pdf"));
        assert_eq!(item.generation, ticket.generation + 1);
    }

    #[test]
    fn test_extensionless_storage_path_is_fetched() {
        let mut app = offline_app();
        load(
            &mut app,
            record(vec![remote_item("Ảnh", "/storage/results/BN0001", AttachmentKind::Image)]),
        );

        let item = &app.items[0];
        assert!(matches!(
            item.renderable.as_ref().map(|r| &r.source),
            Some(RenderSource::Remote(path)) if path == "/storage/results/BN0001"
        ));
        assert!(matches!(item.display, ItemDisplay::Loading));
        assert_eq!(item.generation, 1);
    }

    #[test]
    fn test_failed_attachment_fetch_becomes_item_fallback() {
        let mut app = offline_app();
        load(
            &mut app,
            record(vec![
                remote_item("Ảnh", "/files/scan", AttachmentKind::Image),
                pdf_item("B"),
            ]),
        );
        let ticket = app.ticket(0);

        let _ = app.update(Message::AttachmentFetched {
            ticket,
            result: Err("server answered 404 Not Found".to_string()),
        });

        assert!(matches!(
            &app.items[0].display,
            ItemDisplay::Failed(msg) if msg.contains("404")
        ));
        assert!(app.items[0].bytes.is_none());
        assert!(app.items[1].bytes.is_some());
        assert!(matches!(app.items[1].display, ItemDisplay::Loading));
    }

    #[test]
    fn test_pixel_ratio_change_rerenders_pdfs_only() {
        let mut app = app_with_ratio(None);
        load(
            &mut app,
            record(vec![
                pdf_item("A"),
                remote_item("Ảnh", "https://example.org/x.jpg", AttachmentKind::Image),
            ]),
        );
        let pdf_before = app.items[0].generation;
        let image_before = app.items[1].generation;

        let _ = app.update(Message::PixelRatioDetected(2.0));

        assert_eq!(app.pixel_ratio, 2.0);
        assert_eq!(app.items[0].generation, pdf_before + 1);
        assert_eq!(app.items[1].generation, image_before);
    }

    #[test]
    fn test_fixed_pixel_ratio_ignores_window_scale() {
        let mut app = offline_app();
        load(&mut app, record(vec![pdf_item("A")]));
        let before = app.items[0].generation;

        let _ = app.update(Message::PixelRatioDetected(2.0));

        assert_eq!(app.pixel_ratio, 1.0);
        assert_eq!(app.items[0].generation, before);
    }

    #[test]
    fn test_print_requires_pdf() {
        let mut app = offline_app();
        let remote = ResultItem {
            name: "Ảnh".to_string(),
            content: "https://example.org/scan.jpg".to_string(),
            kind: AttachmentKind::Image,
        };
        load(&mut app, record(vec![remote]));

        let _ = app.update(Message::Print(0));
        assert!(app.status.as_deref().unwrap().contains("chỉ in được kết quả PDF"));
    }
}
