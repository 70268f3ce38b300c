/*!
 * GUI application for atlas-rs - world country explorer
 *
 * A cross-platform desktop application for browsing the REST Countries
 * dataset: search and filter by region, mark favorites, and compare up to
 * four countries side by side with bar charts.
 *
 * Platform support: Windows, macOS, Linux
 */

use atlas_rs::app::{AppState, COMPARE_LIMIT_MESSAGE, Phase};
use atlas_rs::favorites::{Favorites, FileBackend, MemBackend};
use atlas_rs::{Client, Country, Region, ToggleOutcome, storage, viz};
use eframe::egui;
use std::time::{Duration, Instant};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Atlas - Country Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Atlas",
        options,
        Box::new(|_cc| Ok(Box::new(AtlasApp::new()))),
    )
}

/// How long the compare-limit warning stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Pending state mutations collected while the (immutably borrowed) view is
/// being drawn, applied once drawing is done.
enum Action {
    ToggleFavorite(String),
    ToggleCompare(String),
    RemoveFromCompare(String),
    ClearCompare,
    ClearFilters,
    SetSearch(String),
    SetRegion(Option<Region>),
    SetFavoritesOnly(bool),
    Retry,
    ExportCsv,
}

struct AtlasApp {
    client: Client,
    state: AppState,
    show_compare: bool,
    notice: Option<(String, Instant)>,
    status_message: String,
}

impl AtlasApp {
    fn new() -> Self {
        let favorites = match FileBackend::default_path() {
            Some(path) => Favorites::load(Box::new(FileBackend::at(path))),
            // No data dir on this platform: favorites just won't survive.
            None => Favorites::load(Box::new(MemBackend::default())),
        };
        Self {
            client: Client::default(),
            state: AppState::new(favorites),
            show_compare: false,
            notice: None,
            status_message: String::new(),
        }
    }

    fn apply(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::ToggleFavorite(id) => {
                    self.state.toggle_favorite(&id);
                }
                Action::ToggleCompare(id) => {
                    if self.state.toggle_compare(&id) == ToggleOutcome::Rejected {
                        self.notice = Some((COMPARE_LIMIT_MESSAGE.to_string(), Instant::now()));
                    }
                }
                Action::RemoveFromCompare(id) => self.state.remove_from_compare(&id),
                Action::ClearCompare => self.state.clear_compare(),
                Action::ClearFilters => self.state.clear_filters(),
                Action::SetSearch(s) => self.state.set_search(s),
                Action::SetRegion(r) => self.state.set_region(r),
                Action::SetFavoritesOnly(on) => self.state.set_favorites_only(on),
                Action::Retry => self.state.retry(&self.client),
                Action::ExportCsv => self.export_csv(),
            }
        }
    }

    fn export_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("countries.csv")
            .save_file()
        else {
            return;
        };
        self.state.refresh_visible();
        let visible: Vec<Country> = self.state.visible().into_iter().cloned().collect();
        self.status_message = match storage::save_csv(&visible, &path) {
            Ok(()) => format!("Saved {} rows to {}", visible.len(), path.display()),
            Err(err) => format!("Export failed: {err:#}"),
        };
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Kick off the initial fetch once.
        if *self.state.phase() == Phase::Idle {
            self.state.spawn_fetch(&self.client);
        }
        self.state.poll();
        if self.state.is_loading() {
            ctx.request_repaint();
        }
        if self
            .notice
            .as_ref()
            .is_some_and(|(_, since)| since.elapsed() > NOTICE_TTL)
        {
            self.notice = None;
        }
        self.state.refresh_visible();

        let mut actions: Vec<Action> = Vec::new();
        self.top_bar(ctx, &mut actions);
        self.compare_tray(ctx, &mut actions);
        self.central(ctx, &mut actions);
        if self.show_compare {
            self.comparison_window(ctx, &mut actions);
        }
        self.apply(actions);
    }
}

impl AtlasApp {
    fn top_bar(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Atlas");
                ui.separator();

                let mut search = self.state.filters().search.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut search)
                        .hint_text("Search country...")
                        .desired_width(240.0),
                );
                if response.changed() {
                    actions.push(Action::SetSearch(search));
                }

                let selected = self.state.filters().region;
                egui::ComboBox::from_id_salt("region_filter")
                    .selected_text(selected.map_or("All regions", |r| r.as_str()))
                    .show_ui(ui, |ui| {
                        let mut choice = selected;
                        ui.selectable_value(&mut choice, None, "All regions");
                        for region in Region::ALL {
                            ui.selectable_value(&mut choice, Some(region), region.as_str());
                        }
                        if choice != selected {
                            actions.push(Action::SetRegion(choice));
                        }
                    });

                let mut favorites_only = self.state.filters().favorites_only;
                let heart = format!("♥ Favorites ({})", self.state.favorites_len());
                if ui.toggle_value(&mut favorites_only, heart).changed() {
                    actions.push(Action::SetFavoritesOnly(favorites_only));
                }

                if ui.button("Export CSV").clicked() {
                    actions.push(Action::ExportCsv);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(updated) = self.state.last_updated() {
                        ui.label(
                            egui::RichText::new(format!(
                                "updated {}",
                                updated.format("%H:%M:%S")
                            ))
                            .weak(),
                        );
                    }
                    if self.state.is_loading() {
                        ui.spinner();
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn central(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.phase().clone() {
                Phase::Idle | Phase::Loading => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.spinner();
                        ui.label("Loading the world map...");
                    });
                }
                Phase::Failed(message) => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(100.0);
                        ui.colored_label(egui::Color32::RED, "⚠ Could not load countries");
                        ui.label(&message);
                        ui.add_space(8.0);
                        if ui.button("Try again").clicked() {
                            actions.push(Action::Retry);
                        }
                    });
                }
                Phase::Loaded => self.country_grid(ui, actions),
            }

            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
        });
    }

    fn country_grid(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let visible = self.state.visible();
        let total = self.state.countries().len();

        ui.horizontal(|ui| {
            ui.label(format!("Showing {} of {} countries", visible.len(), total));
            if self.state.filters().favorites_only {
                ui.label(egui::RichText::new("FILTER: FAVORITES").small().strong());
            }
        });
        ui.add_space(4.0);

        if visible.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label("No country matches the current criteria.");
                if ui.button("Clear filters").clicked() {
                    actions.push(Action::ClearFilters);
                }
            });
            return;
        }

        let locale = viz::map_locale("en");
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for country in visible {
                    self.country_card(ui, country, locale, actions);
                }
            });
        });
    }

    fn country_card(
        &self,
        ui: &mut egui::Ui,
        country: &Country,
        locale: &'static num_format::Locale,
        actions: &mut Vec<Action>,
    ) {
        let id = country.cca3.clone();
        let favorite = self.state.is_favorite(&id);
        let comparing = self.state.compare().contains(&id);

        ui.group(|ui| {
            ui.set_width(230.0);
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.strong(country.display_name());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let heart = if favorite { "♥" } else { "♡" };
                        if ui
                            .button(heart)
                            .on_hover_text(if favorite {
                                "Remove from favorites"
                            } else {
                                "Add to favorites"
                            })
                            .clicked()
                        {
                            actions.push(Action::ToggleFavorite(id.clone()));
                        }
                    });
                });
                ui.label(format!("Region: {}", country.region));
                ui.label(format!(
                    "Population: {}",
                    viz::fmt_int(country.population, locale)
                ));
                ui.label(format!(
                    "Capital: {}",
                    country.capitals_joined().unwrap_or_else(|| "N/A".into())
                ));
                if !country.flags.svg.is_empty() {
                    let alt = country
                        .flags
                        .alt
                        .clone()
                        .unwrap_or_else(|| format!("Flag of {}", country.display_name()));
                    ui.hyperlink_to("flag", &country.flags.svg).on_hover_text(alt);
                }
                let compare_label = if comparing { "Comparing" } else { "Compare" };
                if ui
                    .add(egui::Button::new(compare_label).selected(comparing))
                    .clicked()
                {
                    actions.push(Action::ToggleCompare(id));
                }
            });
        });
    }

    fn compare_tray(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        if self.state.compare().is_empty() && self.notice.is_none() {
            return;
        }
        egui::TopBottomPanel::bottom("compare_tray").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let count = self.state.compare().len();
                ui.strong(format!("{count} to compare"));
                if count > 0 {
                    if ui.button("Compare now").clicked() {
                        self.show_compare = true;
                    }
                    if ui.button("Clear").clicked() {
                        actions.push(Action::ClearCompare);
                    }
                }
                if let Some((message, _)) = &self.notice {
                    ui.colored_label(egui::Color32::YELLOW, message);
                }
            });
            ui.add_space(4.0);
        });
    }

    fn comparison_window(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let countries: Vec<Country> = self
            .state
            .compare_countries()
            .into_iter()
            .cloned()
            .collect();
        let locale = viz::map_locale("en");

        let mut open = self.show_compare;
        egui::Window::new("Country Comparison")
            .open(&mut open)
            .default_width(760.0)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (idx, country) in countries.iter().enumerate() {
                        let (r, g, b) = viz::palette_color(idx);
                        let color = egui::Color32::from_rgb(r, g, b);
                        ui.group(|ui| {
                            ui.set_width(170.0);
                            ui.vertical(|ui| {
                                ui.horizontal(|ui| {
                                    ui.colored_label(color, country.display_name());
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            if ui
                                                .small_button("✖")
                                                .on_hover_text("Remove from comparison")
                                                .clicked()
                                            {
                                                actions.push(Action::RemoveFromCompare(
                                                    country.cca3.clone(),
                                                ));
                                            }
                                        },
                                    );
                                });
                                ui.label(country.first_capital().unwrap_or("N/A"));
                                ui.label(viz::fmt_int(country.population, locale));
                                ui.label(format!("{} km²", viz::fmt_area(country.area, locale)));
                            });
                        });
                    }
                });

                ui.separator();
                let refs: Vec<&Country> = countries.iter().collect();
                bar_chart(ui, "Population", &viz::population_data(&refs));
                ui.add_space(8.0);
                bar_chart(ui, "Area (km²)", &viz::area_data(&refs));

                ui.add_space(8.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        // Closing keeps the selection; it is only cleared
                        // explicitly from the tray.
                        self.show_compare = false;
                    }
                });
            });
        self.show_compare = self.show_compare && open;
    }
}

/// Horizontal bar chart keyed by cca3, colored by selection position.
fn bar_chart(ui: &mut egui::Ui, title: &str, data: &[viz::ChartDatum]) {
    use egui_plot::{Bar, BarChart, Plot};

    ui.strong(title);
    let bars: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(idx, d)| {
            let (r, g, b) = viz::palette_color(idx);
            Bar::new(idx as f64, d.value)
                .name(format!("{} ({})", d.full, d.label))
                .width(0.6)
                .fill(egui::Color32::from_rgb(r, g, b))
        })
        .collect();
    let chart = BarChart::new(bars).horizontal();

    let labels: Vec<String> = data.iter().map(|d| d.label.clone()).collect();
    Plot::new(title.to_string())
        .height(140.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as i64;
            if (mark.value - idx as f64).abs() < 1e-6 && idx >= 0 && (idx as usize) < labels.len()
            {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
