//! # 粘贴
//!
//! ## 设计思路
//!
//! `paste` 只读取存储（`&self`），按格式标签分派到各自的重建函数，
//! 因此连续粘贴两次得到相同结果，不存在“被消费”的内容。
//!
//! ## 实现思路
//!
//! - 图像：先转换 / 协调到目标色彩模式，再按锚点策略作为浮动内容插入。
//! - 调色板条目：在副本上写入，全部校验通过后一次性 `set_palette`。
//! - 文档范围：先规划（是否溢出、需要新建多少图层 / 帧），
//!   `Fail` 策略下在任何修改之前返回 `RangeTooLarge`；然后准备全部 cel，最后才写入文档。

use crate::doc::{
    Cel, ColorMode, DocumentReader, DocumentWriter, FloatingPaste, Image, LayerId,
    MAX_INDEXED_COLORS, Mask, Palette, Point, RangeKind, Size,
};
use crate::error::ClipboardError;

use super::reconcile::{Reconciled, TransparentIndices};
use super::snapshot::{ImageSnapshot, PaletteSnapshot, RangeSnapshot};
use super::{Clipboard, ClipboardContent, PasteAnchor, RangeOverflowPolicy, raster};

/// 调色板因粘贴而变长。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteResized {
    pub from: usize,
    pub to: usize,
}

/// 一次粘贴的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// 剪贴板为空，文档未被修改
    NothingToPaste,
    Image {
        position: Point,
        size: Size,
        /// 目标调色板是否被协调策略替换
        palette_replaced: bool,
    },
    PaletteEntries {
        written: usize,
        resized: Option<PaletteResized>,
    },
    DocumentRange {
        layers: usize,
        frames: usize,
        created_layers: usize,
        created_frames: usize,
    },
}

impl Clipboard {
    /// 将剪贴板内容重建到目标文档。
    pub fn paste<W>(&self, target: &mut W) -> Result<PasteOutcome, ClipboardError>
    where
        W: DocumentWriter + ?Sized,
    {
        log::debug!("📋 粘贴 - format={}", self.store.format().as_str());

        match self.store.content() {
            ClipboardContent::None => {
                log::debug!("📋 剪贴板为空，没有可粘贴的内容");
                Ok(PasteOutcome::NothingToPaste)
            }
            ClipboardContent::Image(snapshot) => self.paste_image(snapshot, target),
            ClipboardContent::PaletteEntries(snapshot) => paste_palette(snapshot, target),
            ClipboardContent::DocumentRange(snapshot) => self.paste_range(snapshot, target),
        }
    }

    fn paste_image<W>(
        &self,
        snapshot: &ImageSnapshot,
        target: &mut W,
    ) -> Result<PasteOutcome, ClipboardError>
    where
        W: DocumentWriter + ?Sized,
    {
        let Reconciled { image, palette } = self.prepare_pixels(
            snapshot.image(),
            snapshot.palette(),
            snapshot.transparent_index(),
            &*target,
        )?;

        let size = image.size();
        let position = anchor_position(
            self.config.paste_anchor,
            snapshot.mask(),
            size,
            target.canvas_size(),
        );
        let mask = snapshot.mask().map(|mask| mask.moved_to(position));

        let palette_replaced = palette.is_some();
        if let Some(palette) = palette {
            target.set_palette(palette)?;
        }

        target.insert_floating(FloatingPaste {
            image,
            mask,
            position,
        })?;

        log::info!(
            "✅ 已粘贴图像 - {}x{} 位置 ({}, {}) anchor={}",
            size.width,
            size.height,
            position.x,
            position.y,
            self.config.paste_anchor.as_str()
        );

        Ok(PasteOutcome::Image {
            position,
            size,
            palette_replaced,
        })
    }

    fn paste_range<W>(
        &self,
        snapshot: &RangeSnapshot,
        target: &mut W,
    ) -> Result<PasteOutcome, ClipboardError>
    where
        W: DocumentWriter + ?Sized,
    {
        let plan = plan_range(snapshot, &*target);

        if plan.overflows() {
            match self.config.range_overflow {
                RangeOverflowPolicy::Fail => {
                    log::debug!(
                        "🚫 目标文档容纳不下 {}x{} 的范围，按策略放弃粘贴",
                        snapshot.layer_count(),
                        snapshot.frame_count()
                    );
                    return Err(plan.too_large());
                }
                RangeOverflowPolicy::Extend => log::debug!(
                    "📋 目标文档将扩展 {} 个图层、{} 帧",
                    plan.missing_layers,
                    plan.missing_frames
                ),
            }
        }

        // 先准备全部像素，转换失败时文档尚未被修改
        let mut palette_update = None;
        let mut prepared = Vec::with_capacity(snapshot.layer_count() * snapshot.frame_count());
        for row in 0..snapshot.layer_count() {
            for col in 0..snapshot.frame_count() {
                let cel = match snapshot.cel(row, col) {
                    Some(cel) => {
                        let Reconciled { image, palette } = self.prepare_pixels(
                            &cel.image,
                            Some(snapshot.palette()),
                            snapshot.transparent_index(),
                            &*target,
                        )?;
                        if palette_update.is_none() {
                            palette_update = palette;
                        }
                        Some(Cel::new(cel.position, image))
                    }
                    None => None,
                };
                prepared.push(cel);
            }
        }

        let mut created_layers = Vec::with_capacity(plan.new_layers + plan.missing_layers);
        for _ in 0..plan.new_layers + plan.missing_layers {
            created_layers.push(target.add_layer()?);
        }
        for _ in 0..plan.inserted_frames {
            target.insert_frame(plan.insert_frames_at)?;
        }
        for _ in 0..plan.missing_frames {
            let end = target.frame_count();
            target.insert_frame(end)?;
        }

        if let Some(palette) = palette_update {
            target.set_palette(palette)?;
        }

        let layers: Vec<LayerId> = target.layers();
        let frame_cols = snapshot.frame_count();
        for (index, cel) in prepared.into_iter().enumerate() {
            let row = index / frame_cols;
            let col = index % frame_cols;
            let layer = layers.get(plan.start_layer + row).copied().ok_or_else(|| {
                ClipboardError::Document(format!("目标图层 {} 不存在", plan.start_layer + row))
            })?;
            target.set_cel(layer, plan.start_frame + col, cel)?;
        }

        let created_frames = plan.inserted_frames + plan.missing_frames;
        log::info!(
            "✅ 已粘贴文档范围 - kind={:?} {} 个图层 × {} 帧（新建图层 {}，新建帧 {}）",
            snapshot.range().kind,
            snapshot.layer_count(),
            frame_cols,
            created_layers.len(),
            created_frames
        );

        Ok(PasteOutcome::DocumentRange {
            layers: snapshot.layer_count(),
            frames: frame_cols,
            created_layers: created_layers.len(),
            created_frames,
        })
    }

    /// 把像素转换 / 协调到目标文档的色彩模式与调色板。
    ///
    /// 索引色之间只要调色板或透明索引不同，就交给协调策略处理。
    fn prepare_pixels<R>(
        &self,
        image: &Image,
        source_palette: Option<&Palette>,
        source_transparent_index: u8,
        target: &R,
    ) -> Result<Reconciled, ClipboardError>
    where
        R: DocumentReader + ?Sized,
    {
        let target_palette = target.palette();
        let target_mode = target.color_mode();
        let transparent = TransparentIndices {
            source: source_transparent_index,
            target: target.transparent_index(),
        };

        match (image.color_mode(), target_mode) {
            (ColorMode::Indexed, ColorMode::Indexed) => {
                let source = source_palette.unwrap_or(target_palette);
                if source != target_palette || transparent.source != transparent.target {
                    self.reconciler()
                        .reconcile(image, source, target_palette, transparent)
                } else {
                    Ok(Reconciled {
                        image: image.clone(),
                        palette: None,
                    })
                }
            }
            (from, to) => {
                let transparent_index = if from == ColorMode::Indexed {
                    transparent.source
                } else {
                    transparent.target
                };
                Ok(Reconciled {
                    image: raster::convert(
                        image,
                        to,
                        source_palette.unwrap_or(target_palette),
                        target_palette,
                        transparent_index,
                    ),
                    palette: None,
                })
            }
        }
    }
}

fn paste_palette<W>(
    snapshot: &PaletteSnapshot,
    target: &mut W,
) -> Result<PasteOutcome, ClipboardError>
where
    W: DocumentWriter + ?Sized,
{
    let source = snapshot.palette();
    let mut palette = target.palette().clone();
    let original_len = palette.len();

    let appended = snapshot.picks().iter().filter(|index| *index >= original_len).count();
    let required = original_len + appended;
    if appended > 0 && required > MAX_INDEXED_COLORS {
        log::debug!("🚫 调色板粘贴后将有 {} 个条目，超出上限", required);
        return Err(ClipboardError::PaletteTooLarge {
            required,
            max: MAX_INDEXED_COLORS,
        });
    }

    let mut written = 0;

    for index in snapshot.picks().iter() {
        let color = source.get(index).ok_or(ClipboardError::InvalidIndex {
            index,
            len: source.len(),
        })?;
        if index < original_len {
            palette.set(index, color);
        } else {
            palette.push(color);
        }
        written += 1;
    }

    let resized = (palette.len() > original_len).then(|| PaletteResized {
        from: original_len,
        to: palette.len(),
    });

    target.set_palette(palette)?;

    match resized {
        Some(resized) => log::info!(
            "✅ 已粘贴 {} 个调色板条目，调色板扩容 {} -> {}",
            written,
            resized.from,
            resized.to
        ),
        None => log::info!("✅ 已粘贴 {} 个调色板条目", written),
    }

    Ok(PasteOutcome::PaletteEntries { written, resized })
}

fn anchor_position(anchor: PasteAnchor, mask: Option<&Mask>, size: Size, canvas: Size) -> Point {
    let centered = Point::new(
        ((canvas.width as i64 - size.width as i64) / 2) as i32,
        ((canvas.height as i64 - size.height as i64) / 2) as i32,
    );
    match anchor {
        PasteAnchor::Centered => centered,
        PasteAnchor::Origin => Point::default(),
        PasteAnchor::Captured => mask.map(Mask::origin).unwrap_or(centered),
    }
}

/// 范围粘贴的落点与需要新建的结构。
#[derive(Debug, Clone, PartialEq, Eq)]
struct RangePlan {
    start_layer: usize,
    start_frame: usize,
    /// 因范围类型本身而新建的图层（`Layers`）
    new_layers: usize,
    /// 因范围类型本身而插入的帧（`Frames`）
    inserted_frames: usize,
    insert_frames_at: usize,
    /// 超出目标容量、需按溢出策略处理的部分
    missing_layers: usize,
    missing_frames: usize,
    available_layers: usize,
    available_frames: usize,
    required_layers: usize,
    required_frames: usize,
}

impl RangePlan {
    fn overflows(&self) -> bool {
        self.missing_layers > 0 || self.missing_frames > 0
    }

    fn too_large(&self) -> ClipboardError {
        ClipboardError::RangeTooLarge {
            required_layers: self.required_layers,
            available_layers: self.available_layers,
            required_frames: self.required_frames,
            available_frames: self.available_frames,
        }
    }
}

fn plan_range<R>(snapshot: &RangeSnapshot, target: &R) -> RangePlan
where
    R: DocumentReader + ?Sized,
{
    let rows = snapshot.layer_count();
    let cols = snapshot.frame_count();
    let layers = target.layers();
    let frame_count = target.frame_count();

    let (start_layer, new_layers) = match snapshot.range().kind {
        RangeKind::Layers => (layers.len(), rows),
        RangeKind::Frames => (0, 0),
        RangeKind::Cels => {
            let start = target
                .active_layer()
                .and_then(|active| layers.iter().position(|layer| *layer == active))
                .unwrap_or(0);
            (start, 0)
        }
    };

    let (start_frame, inserted_frames) = match snapshot.range().kind {
        RangeKind::Frames => ((target.active_frame() + 1).min(frame_count), cols),
        RangeKind::Layers => (0, 0),
        RangeKind::Cels => (target.active_frame(), 0),
    };

    let available_layers = layers.len() + new_layers;
    let available_frames = frame_count + inserted_frames;
    let required_layers = start_layer + rows;
    let required_frames = start_frame + cols;

    RangePlan {
        start_layer,
        start_frame,
        new_layers,
        inserted_frames,
        insert_frames_at: start_frame,
        missing_layers: required_layers.saturating_sub(available_layers),
        missing_frames: required_frames.saturating_sub(available_frames),
        available_layers,
        available_frames,
        required_layers,
        required_frames,
    }
}
