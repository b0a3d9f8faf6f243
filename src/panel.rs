use crate::math::hex_from_rgb;
use crate::params::{ParamChange, ParamKey, ParamSnapshot, ParamValue};

/// Read-only numbers shown under the controls
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanelStats {
    pub fps: f32,
    pub time: f32,
    pub frame: u64,
    pub objects: usize,
    pub pending_assets: usize,
}

/// Operator panel: one control per parameter plus frame stats.
///
/// The panel never writes the parameter surface itself. Every edit comes back as a
/// [`ParamChange`] that the host applies between frames.
#[derive(Debug, Clone, Default)]
pub struct ParameterPanel {
    values: ParamSnapshot,
    stats: PanelStats,
}

impl ParameterPanel {
    pub fn new(values: ParamSnapshot) -> Self {
        Self {
            values,
            stats: PanelStats::default(),
        }
    }

    /// Sync the displayed values with what the surface accepted
    pub fn set_state(&mut self, values: ParamSnapshot, stats: PanelStats) {
        self.values = values;
        self.stats = stats;
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Vec<ParamChange> {
        let mut changes = Vec::new();
        let stats = self.stats;
        let values = &mut self.values;

        egui::Window::new("Smoke")
            .title_bar(true)
            .resizable(false)
            .default_pos(egui::pos2(10.0, 10.0))
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading(
                    egui::RichText::new(format!("{:.0} FPS", stats.fps))
                        .size(28.0)
                        .color(egui::Color32::from_rgb(74, 158, 255)),
                );
                ui.add_space(5.0);
                ui.separator();

                let (min, max) = ParamKey::Opacity.range();
                if ui
                    .add(egui::Slider::new(&mut values.opacity, min..=max).text(ParamKey::Opacity.label()))
                    .changed()
                {
                    changes.push(ParamChange {
                        key: ParamKey::Opacity,
                        value: ParamValue::Scalar(values.opacity),
                    });
                }

                ui.horizontal(|ui| {
                    ui.label(ParamKey::BaseColor.label());
                    if ui.color_edit_button_rgb(&mut values.base_color).changed() {
                        changes.push(ParamChange {
                            key: ParamKey::BaseColor,
                            value: ParamValue::Color(values.base_color),
                        });
                    }
                    ui.monospace(format!("#{:06x}", hex_from_rgb(values.base_color)));
                });

                let (min, max) = ParamKey::LightIntensity.range();
                if ui
                    .add(
                        egui::Slider::new(&mut values.light_intensity, min..=max)
                            .text(ParamKey::LightIntensity.label()),
                    )
                    .changed()
                {
                    changes.push(ParamChange {
                        key: ParamKey::LightIntensity,
                        value: ParamValue::Scalar(values.light_intensity),
                    });
                }

                ui.add_space(5.0);
                ui.separator();
                ui.monospace(format!("Time:    {:.2}s", stats.time));
                ui.monospace(format!("Frame:   {}", stats.frame));
                ui.monospace(format!("Objects: {}", stats.objects));
                ui.monospace(format!("Loading: {}", stats.pending_assets));
            });

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_panel_emits_nothing() {
        let ctx = egui::Context::default();
        let mut panel = ParameterPanel::new(ParamSnapshot::default());
        let mut changes = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            changes = panel.show(ctx);
        });
        assert!(changes.is_empty());
    }

    #[test]
    fn test_set_state_replaces_values() {
        let mut panel = ParameterPanel::new(ParamSnapshot::default());
        let values = ParamSnapshot {
            opacity: 0.2,
            ..ParamSnapshot::default()
        };
        panel.set_state(values, PanelStats::default());
        assert_eq!(panel.values.opacity, 0.2);
    }
}
