use std::time::Duration;

use client_core::{report::PLACEHOLDER_TEXT, AnalyzeButton, Endpoints, ReportView, SampleCatalog};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{AuscultationSite, Gender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_startup_failure, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::DashboardState;
use crate::ui::theme;

const BACKEND_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct HeartGuardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    endpoints: Endpoints,
    state: DashboardState,
}

impl HeartGuardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            endpoints,
            state: DashboardState::new(),
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        if let Err(cmd) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status) {
            self.state.command_rejected(cmd);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn try_analyze(&mut self) {
        if let Some(cmd) = self.state.request_analysis() {
            self.dispatch(cmd);
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::NONE.inner_margin(egui::Margin::symmetric(20, 14)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("♥").size(28.0).color(theme::ACCENT));
                    ui.vertical(|ui| {
                        ui.heading(egui::RichText::new("HeartGuard Expert System").strong());
                        ui.weak("Early diagnosis of heart disease from heart sounds");
                    });
                });
            });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.state.status).weak());
            });
        });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.label(
                egui::RichText::new("ANALYSIS INFORMATION")
                    .strong()
                    .color(theme::ACCENT),
            );
            ui.add_space(8.0);

            let catalog = self.state.workflow.catalog().cloned().unwrap_or_default();
            let form = self.state.workflow.form().clone();

            let mut sample = form.sample.clone();
            let sample_text = sample
                .as_ref()
                .and_then(|id| catalog.label_for(id))
                .unwrap_or_else(|| "No heart sounds available".to_string());
            ui.small("HEART SOUND");
            egui::ComboBox::from_id_salt("sample_picker")
                .selected_text(sample_text)
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for (index, id) in catalog.iter().enumerate() {
                        ui.selectable_value(
                            &mut sample,
                            Some(id.clone()),
                            SampleCatalog::display_label(index),
                        );
                    }
                });
            if sample != form.sample {
                if let Some(id) = sample {
                    if let Err(err) = self.state.workflow.select_sample(id) {
                        tracing::warn!("sample selection rejected: {err}");
                    }
                }
            }

            ui.add_space(6.0);
            ui.columns(2, |columns| {
                let mut gender = form.gender;
                columns[0].small("GENDER");
                egui::ComboBox::from_id_salt("gender_picker")
                    .selected_text(gender.label())
                    .show_ui(&mut columns[0], |ui| {
                        for option in Gender::ALL {
                            ui.selectable_value(&mut gender, option, option.label());
                        }
                    });

                let mut site = form.site;
                columns[1].small("LOCATION");
                egui::ComboBox::from_id_salt("site_picker")
                    .selected_text(site.code())
                    .show_ui(&mut columns[1], |ui| {
                        for option in AuscultationSite::ALL {
                            ui.selectable_value(&mut site, option, option.code());
                        }
                    });

                if gender != form.gender {
                    self.state.workflow.set_gender(gender);
                }
                if site != form.site {
                    self.state.workflow.set_site(site);
                }
            });
        });

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(
                "The selected location and gender directly affect the result alongside the \
                 sound analysis. Enter the information provided by the clinic.",
            )
            .small()
            .weak(),
        );
    }

    fn show_listen_and_analyze(&mut self, ui: &mut egui::Ui) {
        let button =
            AnalyzeButton::for_outcome(self.state.can_analyze(), self.state.workflow.outcome());
        let listen_url = self
            .state
            .workflow
            .selected_sample()
            .map(|id| self.endpoints.listen(id).to_string());

        let clicked = theme::card_frame()
            .show(ui, |ui| {
                ui.label(egui::RichText::new("SIGNAL LISTENING").strong().weak());
                ui.add_space(6.0);
                match &listen_url {
                    Some(url) => {
                        ui.hyperlink_to("▶ Play selected heart sound", url);
                    }
                    None => {
                        ui.weak("No heart sound selected");
                    }
                }
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let btn = egui::Button::new(
                        egui::RichText::new(button.label).strong().size(16.0),
                    )
                    .min_size(egui::vec2(240.0, 40.0));
                    let clicked = ui.add_enabled(button.enabled, btn).clicked();
                    if button.busy {
                        ui.add(egui::Spinner::new());
                    }
                    clicked
                })
                .inner
            })
            .inner;

        if clicked {
            self.try_analyze();
        }
    }

    fn show_report(&self, ui: &mut egui::Ui) {
        let view = ReportView::from_outcome(self.state.workflow.outcome());
        let frame = match &view {
            ReportView::Result { verdict, .. } => {
                let palette = theme::verdict_palette(*verdict);
                theme::card_frame()
                    .fill(palette.fill)
                    .stroke(egui::Stroke::new(1.0, palette.stroke))
            }
            _ => theme::card_frame(),
        };

        frame.show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("DIAGNOSIS REPORT").strong());
            ui.add_space(8.0);
            ui.vertical_centered(|ui| match &view {
                ReportView::Placeholder => {
                    ui.label(egui::RichText::new(PLACEHOLDER_TEXT).italics().weak());
                }
                ReportView::InProgress => {
                    ui.add(egui::Spinner::new());
                }
                ReportView::Result { headline, verdict } => {
                    ui.label(
                        egui::RichText::new(headline)
                            .size(30.0)
                            .strong()
                            .color(theme::verdict_palette(*verdict).text),
                    );
                }
                ReportView::Failed { message } => {
                    ui.label(egui::RichText::new(message).color(theme::ERROR_TEXT));
                    ui.small("Press START ANALYSIS to retry.");
                }
            });
        });
    }

    fn show_startup_alert(&self, ctx: &egui::Context) {
        let Some(alert) = &self.state.startup_alert else {
            return;
        };
        let summary = describe_startup_failure(alert);
        let _ = egui::Modal::new(egui::Id::new("startup_alert")).show(ctx, |ui| {
            ui.set_width(380.0);
            ui.heading("Backend unavailable");
            ui.add_space(6.0);
            ui.label(summary);
            ui.add_space(4.0);
            ui.label(egui::RichText::new(alert.message()).small().weak());
            ui.add_space(8.0);
            ui.label("Relaunch the application to try again.");
        });
    }
}

impl eframe::App for HeartGuardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(cmd) = self.state.start() {
            self.dispatch(cmd);
        }
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let enabled = self.state.form_enabled();
                ui.add_enabled_ui(enabled, |ui| self.show_form(ui));
                ui.add_space(12.0);
                self.show_listen_and_analyze(ui);
                ui.add_space(12.0);
                self.show_report(ui);
            });
        });
        self.show_startup_alert(ctx);

        if self.state.awaiting_backend() {
            ctx.request_repaint_after(BACKEND_POLL_INTERVAL);
        }
    }
}
