//! # 捕获操作
//!
//! ## 设计思路
//!
//! 所有捕获都遵循同一顺序：从文档协作者读取 → 校验 → 构造快照 → 整体替换存储。
//! 任一步失败都直接返回错误，存储保持原状（不会出现“写了一半”的剪贴板）。
//!
//! ## 实现思路
//!
//! - `copy` / `copy_merged` 先把选区范围展平为一张图像，再委托 `copy_image`。
//! - `cut` = `copy` + 交由协作者清除选区；撤销不在本模块职责内。
//! - 文档参数均为泛型 `?Sized`，`&dyn DocumentReader` 与具体类型都能直接传入。

use std::collections::HashSet;

use crate::doc::{
    Cel, DocRange, DocumentReader, DocumentWriter, Image, LayerId, Mask, Palette, PalettePicks,
    Rect,
};
use crate::error::ClipboardError;

use super::snapshot::{ImageSnapshot, PaletteSnapshot, RangeSnapshot};
use super::{Clipboard, ClipboardContent, raster};

/// 展平时参与合成的图层。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayerSelection {
    Active,
    Visible,
}

impl Clipboard {
    /// 复制图像（深拷贝像素、蒙版与调色板），索引色按透明索引 0 解释。
    ///
    /// 图像尺寸为空或蒙版大于图像时返回 `InvalidRegion`，剪贴板内容不变。
    pub fn copy_image(
        &mut self,
        image: &Image,
        mask: Option<&Mask>,
        palette: Option<&Palette>,
    ) -> Result<(), ClipboardError> {
        self.copy_image_with_transparency(image, mask, palette, 0)
    }

    /// 同 `copy_image`，但显式给出索引色像素的透明索引。
    pub fn copy_image_with_transparency(
        &mut self,
        image: &Image,
        mask: Option<&Mask>,
        palette: Option<&Palette>,
        transparent_index: u8,
    ) -> Result<(), ClipboardError> {
        let snapshot = ImageSnapshot::capture(image, mask, palette, transparent_index)?;

        log::info!(
            "✅ 已复制图像 - {}x{} mode={} mask={} palette={} transparent={}",
            image.width(),
            image.height(),
            image.color_mode().as_str(),
            mask.is_some(),
            palette.map(Palette::len).unwrap_or(0),
            transparent_index
        );

        self.store.set_content(ClipboardContent::Image(snapshot));
        Ok(())
    }

    /// 复制调色板中被选中的条目。
    pub fn copy_palette(
        &mut self,
        palette: &Palette,
        picks: &PalettePicks,
    ) -> Result<(), ClipboardError> {
        let snapshot = PaletteSnapshot::capture(palette, picks)?;

        log::info!(
            "✅ 已复制调色板条目 - {} 个（调色板 {} 色）",
            picks.len(),
            palette.len()
        );

        self.store.set_content(ClipboardContent::PaletteEntries(snapshot));
        Ok(())
    }

    /// 复制矩形 (图层, 帧) 选区中的每个 cel。
    pub fn copy_range<R>(&mut self, context: &R, range: &DocRange) -> Result<(), ClipboardError>
    where
        R: DocumentReader + ?Sized,
    {
        if range.is_empty() {
            log::debug!("🚫 选区不包含任何 cel，放弃复制");
            return Err(ClipboardError::EmptyRange);
        }

        validate_range(context, range)?;

        let mut cels: Vec<Option<Cel>> = Vec::with_capacity(range.cel_count());
        for layer in &range.layers {
            for frame in &range.frames {
                cels.push(context.cel(*layer, *frame).cloned());
            }
        }

        let snapshot = RangeSnapshot::new(
            range.clone(),
            cels,
            context.color_mode(),
            context.palette().clone(),
            context.transparent_index(),
        )?;

        log::info!(
            "✅ 已复制文档范围 - kind={:?} {} 个图层 × {} 帧",
            range.kind,
            range.layers.len(),
            range.frames.len()
        );

        self.store.set_content(ClipboardContent::DocumentRange(snapshot));
        Ok(())
    }

    /// 复制活动图层在活动帧上、选区范围内的像素。
    pub fn copy<R>(&mut self, context: &R) -> Result<(), ClipboardError>
    where
        R: DocumentReader + ?Sized,
    {
        self.copy_flattened(context, LayerSelection::Active)
    }

    /// 复制所有可见图层合并后的像素。
    pub fn copy_merged<R>(&mut self, context: &R) -> Result<(), ClipboardError>
    where
        R: DocumentReader + ?Sized,
    {
        self.copy_flattened(context, LayerSelection::Visible)
    }

    /// 复制后请协作者清除活动 cel 上的选区内容。
    pub fn cut<W>(&mut self, context: &mut W) -> Result<(), ClipboardError>
    where
        W: DocumentWriter + ?Sized,
    {
        self.copy(&*context)?;

        let layer = context
            .active_layer()
            .ok_or_else(|| ClipboardError::InvalidRegion("没有活动图层".to_string()))?;
        let frame = context.active_frame();
        let selection = context.selection().cloned();

        context.clear_region(layer, frame, selection.as_ref())?;
        log::debug!("✂️ 已剪切图层 {} 第 {} 帧的选区", layer.0, frame);
        Ok(())
    }

    fn copy_flattened<R>(
        &mut self,
        context: &R,
        which: LayerSelection,
    ) -> Result<(), ClipboardError>
    where
        R: DocumentReader + ?Sized,
    {
        let (image, mask) = flatten(context, which)?;
        self.copy_image_with_transparency(
            &image,
            Some(&mask),
            Some(context.palette()),
            context.transparent_index(),
        )
    }
}

fn validate_range<R>(context: &R, range: &DocRange) -> Result<(), ClipboardError>
where
    R: DocumentReader + ?Sized,
{
    let doc_layers: HashSet<LayerId> = context.layers().into_iter().collect();
    let mut seen_layers = HashSet::with_capacity(range.layers.len());
    for layer in &range.layers {
        if !doc_layers.contains(layer) {
            return Err(ClipboardError::InvalidRegion(format!("图层 {} 不存在", layer.0)));
        }
        if !seen_layers.insert(*layer) {
            return Err(ClipboardError::InvalidRegion(format!("图层 {} 重复出现", layer.0)));
        }
    }

    let frame_count = context.frame_count();
    let mut seen_frames = HashSet::with_capacity(range.frames.len());
    for frame in &range.frames {
        if *frame >= frame_count {
            return Err(ClipboardError::InvalidRegion(format!(
                "帧 {} 超出范围（共 {} 帧）",
                frame, frame_count
            )));
        }
        if !seen_frames.insert(*frame) {
            return Err(ClipboardError::InvalidRegion(format!("帧 {} 重复出现", frame)));
        }
    }

    Ok(())
}

/// 将选区（无选区时为整张画布）范围内的图层合成为一张图像。
///
/// 返回的蒙版已裁剪到合成区域，`origin` 即该区域在画布上的位置。
fn flatten<R>(context: &R, which: LayerSelection) -> Result<(Image, Mask), ClipboardError>
where
    R: DocumentReader + ?Sized,
{
    let canvas = Rect::from_size(context.canvas_size());
    let selection = context.selection();
    let region = match selection {
        Some(mask) => mask.bounds().intersect(&canvas),
        None => Some(canvas).filter(|rect| !rect.is_empty()),
    }
    .ok_or_else(|| ClipboardError::InvalidRegion("选区与画布没有交集".to_string()))?;

    let layers: Vec<LayerId> = match which {
        LayerSelection::Active => vec![context
            .active_layer()
            .ok_or_else(|| ClipboardError::InvalidRegion("没有活动图层".to_string()))?],
        LayerSelection::Visible => context
            .layers()
            .into_iter()
            .filter(|layer| context.is_layer_visible(*layer))
            .collect(),
    };

    let transparent_index = context.transparent_index();
    let frame = context.active_frame();
    let mut image = Image::blank(context.color_mode(), region.size, transparent_index);

    for layer in layers {
        if let Some(cel) = context.cel(layer, frame) {
            raster::composite(
                &mut image,
                &cel.image,
                cel.position.x as i64 - region.origin.x as i64,
                cel.position.y as i64 - region.origin.y as i64,
                transparent_index,
            )?;
        }
    }

    let mask = match selection {
        Some(mask) => {
            let cropped = mask.cropped(region);
            raster::apply_mask(&mut image, &cropped, region.origin, transparent_index);
            cropped
        }
        None => Mask::from_rect(region),
    };

    Ok((image, mask))
}
