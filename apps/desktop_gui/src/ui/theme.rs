use client_core::Verdict;
use egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(14, 165, 233);
pub const CARD_FILL: Color32 = Color32::from_rgb(15, 23, 42);
pub const CARD_STROKE: Color32 = Color32::from_rgb(30, 41, 59);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictPalette {
    pub fill: Color32,
    pub stroke: Color32,
    pub text: Color32,
}

pub fn verdict_palette(verdict: Verdict) -> VerdictPalette {
    match verdict {
        Verdict::Favorable => VerdictPalette {
            fill: Color32::from_rgba_unmultiplied(16, 185, 129, 26),
            stroke: Color32::from_rgb(16, 185, 129),
            text: Color32::from_rgb(52, 211, 153),
        },
        Verdict::Unfavorable => VerdictPalette {
            fill: Color32::from_rgba_unmultiplied(244, 63, 94, 26),
            stroke: Color32::from_rgb(244, 63, 94),
            text: Color32::from_rgb(251, 113, 133),
        },
    }
}

pub fn card_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(CARD_FILL)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(16, 14))
}
