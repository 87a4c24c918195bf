use crate::{
    core::{config::EngineConfig, seed::SessionSeed},
    data::source::FeatureSource,
    input::{
        events::{ControlEvent, ControlId, EventHandled},
        state::{FilterContext, Transition, VisibilityState},
    },
    layers::{
        assignment::{AssignmentPass, CategoryAssignment},
        base::LayerSpec,
        builder::PredicateBuilder,
        filter::Filter,
    },
    rendering::icons::IconRegistry,
    traits::{Cursor, IconLoader, MapSurface},
    ui::{
        controls::{FilterSelection, ToggleLabel},
        popup::{PopupContent, PopupOptions},
    },
    Error, Result,
};

/// Drives a [`MapSurface`]: loads the source, creates the layers and keeps
/// their filters in line with the controls.
///
/// The selection and the assignment are replaced wholesale on every change,
/// and every filter is re-derived from them.
pub struct Explorer {
    config: EngineConfig,
    seed: SessionSeed,
    builder: PredicateBuilder,
    icons: IconRegistry,
    assignment: CategoryAssignment,
    selection: FilterSelection,
    state: VisibilityState,
    popup_options: PopupOptions,
    /// Set once the category layers exist
    ready: bool,
}

impl Explorer {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let seed = config
            .seed
            .map(SessionSeed::fixed)
            .unwrap_or_else(SessionSeed::current);
        let builder = PredicateBuilder::new(
            config.categories.clone(),
            config.themes.clone(),
            config.none_gate,
        );
        let icons = IconRegistry::new(config.fallback_icon_url.clone());

        Ok(Self {
            config,
            seed,
            builder,
            icons,
            assignment: CategoryAssignment::new(),
            selection: FilterSelection::new(),
            state: VisibilityState::AllShown,
            popup_options: PopupOptions::default(),
            ready: false,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> SessionSeed {
        self.seed
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn assignment(&self) -> &CategoryAssignment {
        &self.assignment
    }

    pub fn toggle_label(&self) -> ToggleLabel {
        self.state.label()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Preloads the category icons, then adds `source`, the background
    /// layer and one symbol layer per category, all drawn unfiltered.
    ///
    /// When any icon fails to load the error is returned and the surface is
    /// left without the source or any layer, so the load can be retried.
    pub async fn load<S, L>(&mut self, surface: &mut S, loader: &L, source: FeatureSource) -> Result<()>
    where
        S: MapSurface + ?Sized,
        L: IconLoader + ?Sized,
    {
        if source.id() != self.config.source_id {
            return Err(Error::Config(format!(
                "expected source '{}', got '{}'",
                self.config.source_id,
                source.id()
            )));
        }
        let source_id = self.config.source_id.clone();
        log::info!(
            "loading source '{}' with {} features at {} locations",
            source_id,
            source.len(),
            source.locations().len()
        );

        let icons = self.config.category_icons();
        self.icons.preload(loader, surface, &icons).await?;

        surface.add_source(source)?;
        surface.add_layer(LayerSpec::circle_background(
            &source_id,
            &self.config.circle_radius_stops,
        ))?;
        for &category in &self.config.categories {
            surface.add_layer(LayerSpec::category_symbol(
                &source_id,
                category,
                &self.config.icon_size_stops,
            ))?;
        }
        self.ready = true;

        self.recompute_assignment(surface);
        let transition = VisibilityState::initial(&self.context());
        self.commit(surface, transition)
    }

    /// Downloads the configured collection, then [`Explorer::load`]s it
    #[cfg(feature = "fetch")]
    pub async fn load_url<S, L>(&mut self, surface: &mut S, loader: &L) -> Result<()>
    where
        S: MapSurface + ?Sized,
        L: IconLoader + ?Sized,
    {
        let source = FeatureSource::fetch(self.config.source_id.clone(), &self.config.data_url).await?;
        self.load(surface, loader, source).await
    }

    /// Reacts to one event. Layer changes are written to `surface` before
    /// this returns.
    pub fn handle<S>(&mut self, surface: &mut S, event: ControlEvent) -> Result<EventHandled>
    where
        S: MapSurface + ?Sized,
    {
        match event {
            ControlEvent::ToggleClicked => {
                if !self.ready {
                    log::debug!("toggle ignored, layers not ready");
                    return Ok(EventHandled::NotHandled);
                }
                if self.state.toggle_shows_all() {
                    self.recompute_assignment(surface);
                }
                let transition = self.state.on_toggle(&self.context());
                self.commit(surface, transition)?;
                Ok(EventHandled::Handled)
            }
            ControlEvent::CheckboxChanged { id, checked } => {
                let selection = match ControlId::parse(&id) {
                    Some(ControlId::Category(category)) => {
                        self.selection.clone().with_category(category, checked)
                    }
                    Some(ControlId::Theme(theme)) => self.selection.clone().with_theme(theme, checked),
                    Some(ControlId::NoneTheme) => self.selection.clone().with_none_theme(checked),
                    Some(ControlId::Toggle) | None => {
                        log::debug!("ignoring change of unknown checkbox '{}'", id);
                        return Ok(EventHandled::NotHandled);
                    }
                };
                if !self.is_configured(&id) {
                    log::debug!("ignoring checkbox '{}' outside this map's controls", id);
                    return Ok(EventHandled::NotHandled);
                }
                self.selection = selection;
                if !self.ready {
                    return Ok(EventHandled::NotHandled);
                }
                let transition = self.state.on_filter_changed(&self.context());
                self.commit(surface, transition)?;
                Ok(EventHandled::Handled)
            }
            ControlEvent::SourceLoaded { source_id, loaded } => {
                if !loaded || !self.ready || source_id != self.config.source_id {
                    return Ok(EventHandled::NotHandled);
                }
                self.recompute_assignment(surface);
                let transition = self
                    .state
                    .on_reload(&self.context(), self.config.reload_policy);
                self.commit(surface, transition)?;
                Ok(EventHandled::Handled)
            }
            ControlEvent::FeatureClicked {
                layer_id,
                location,
                at,
            } => {
                if !self.is_category_layer(&layer_id) {
                    return Ok(EventHandled::NotHandled);
                }
                let features = surface.query_source_features(
                    &self.config.source_id,
                    Some(&Filter::location_eq(location.as_str())),
                );
                let content = PopupContent::build(&location, &features);
                surface.show_popup(at, &content, &self.popup_options);
                Ok(EventHandled::Handled)
            }
            ControlEvent::PointerEnter { layer_id } => {
                if !self.is_category_layer(&layer_id) {
                    return Ok(EventHandled::NotHandled);
                }
                surface.set_cursor(Cursor::Pointer);
                Ok(EventHandled::Handled)
            }
            ControlEvent::PointerLeave { layer_id } => {
                if !self.is_category_layer(&layer_id) {
                    return Ok(EventHandled::NotHandled);
                }
                surface.set_cursor(Cursor::Default);
                Ok(EventHandled::Handled)
            }
            ControlEvent::ImageMissing { id } => {
                log::debug!("missing image '{}' needs on_image_missing", id);
                Ok(EventHandled::NotHandled)
            }
        }
    }

    /// Registers the fallback icon under `id`. Never fails; problems are logged.
    pub async fn on_image_missing<S, L>(&self, surface: &mut S, loader: &L, id: &str) -> EventHandled
    where
        S: MapSurface + ?Sized,
        L: IconLoader + ?Sized,
    {
        if self.icons.resolve_missing(loader, surface, id).await {
            EventHandled::Handled
        } else {
            EventHandled::NotHandled
        }
    }

    /// Whether this map variant shows the checkbox `id`
    fn is_configured(&self, id: &str) -> bool {
        match ControlId::parse(id) {
            Some(ControlId::Category(category)) => self.config.categories.contains(&category),
            Some(ControlId::Theme(theme)) => self.config.themes.contains(&theme),
            Some(ControlId::NoneTheme) => self.config.has_theme_filters(),
            Some(ControlId::Toggle) | None => false,
        }
    }

    fn is_category_layer(&self, layer_id: &str) -> bool {
        self.config
            .categories
            .iter()
            .any(|category| category.layer_id() == layer_id)
    }

    fn context(&self) -> FilterContext<'_> {
        FilterContext {
            builder: &self.builder,
            assignment: &self.assignment,
            selection: &self.selection,
        }
    }

    /// Replaces the assignment from the features currently in the source
    fn recompute_assignment<S: MapSurface + ?Sized>(&mut self, surface: &S) {
        let features = surface.query_source_features(&self.config.source_id, None);
        self.assignment = AssignmentPass::new(self.seed, self.config.categories.clone())
            .with_none_cap(self.config.none_cap)
            .run(&features);
    }

    fn commit<S: MapSurface + ?Sized>(&mut self, surface: &mut S, transition: Transition) -> Result<()> {
        for update in &transition.updates {
            surface.apply(update)?;
        }
        if transition.next != self.state {
            log::debug!("visibility {:?} -> {:?}", self.state, transition.next);
        }
        self.state = transition.next;
        Ok(())
    }
}
