//! Stylesheets shared by the exported site and the preview document.

use dnamatrix_blocks::DesignTokens;

/// Base document styles. Utility classes come from the Tailwind CDN; these
/// cover the named classes the block markup uses.
pub const BASE_STYLES: &str = "body{background:var(--dna-bg);color:var(--dna-text);font-family:var(--dna-font);margin:0;overflow-x:hidden;transition:background 0.4s,color 0.4s;}\
.container-dna{max-width:var(--dna-container);margin:0 auto;padding:0 1.5rem;}\
.glass-nav{background:rgba(0,0,0,0.8);backdrop-filter:blur(12px);border-bottom:1px solid rgba(255,255,255,0.1);}\
.light-mode .glass-nav{background:rgba(255,255,255,0.9);border-bottom:1px solid rgba(0,0,0,0.1);}\
.light-mode .dna-card{background:#F9FAFB;border-color:#E5E7EB;}\
.dna-card{background:rgba(255,255,255,0.03);border:1px solid rgba(255,255,255,0.08);border-radius:var(--dna-radius);padding:2rem;transition:all 0.3s;height:100%;}\
.dna-card:hover{background:rgba(255,255,255,0.06);transform:translateY(-5px);border-color:var(--dna-accent);}\
img{display:block;max-width:100%;}\
.img-wrapper{width:100%;overflow:hidden;position:relative;}\
.img-wrapper img{width:100%;height:100%;object-fit:cover;}\
.btn-primary{padding:1rem 2.5rem;background:var(--dna-accent);color:white;font-weight:700;border-radius:var(--dna-radius);text-transform:uppercase;font-size:0.875rem;letter-spacing:0.1em;transition:all 0.3s;border:none;cursor:pointer;display:inline-block;}\
.btn-primary:hover{transform:scale(1.05);}\
.btn-secondary{padding:1rem 2.5rem;border:2px solid currentColor;opacity:0.6;border-radius:var(--dna-radius);background:transparent;cursor:pointer;font-weight:600;display:inline-block;}\
.btn-secondary:hover{opacity:1;}\
.hero-title{font-size:clamp(2.5rem,8vw,7rem);line-height:0.9;font-weight:900;letter-spacing:-0.04em;}\
.testimonial-card{background:rgba(255,255,255,0.03);border:1px solid rgba(255,255,255,0.08);border-radius:var(--dna-radius);padding:2.5rem;}\
.testimonial-avatar{width:60px;height:60px;border-radius:50%;overflow:hidden;object-fit:cover;}\
@keyframes levitate{0%{transform:translateY(0px);}50%{transform:translateY(-15px);}100%{transform:translateY(0px);}}\
.footer-links{display:flex;flex-wrap:wrap;gap:2rem;justify-content:center;}\
.footer-links a{opacity:0.6;transition:opacity 0.3s;}\
.footer-links a:hover{opacity:1;color:var(--dna-accent);}\
.dna-pattern{position:absolute;inset:0;pointer-events:none;opacity:0.08;}\
.pattern-dots{background-image:radial-gradient(currentColor 1px,transparent 1px);background-size:20px 20px;}\
.pattern-grid{background-image:linear-gradient(currentColor 1px,transparent 1px),linear-gradient(90deg,currentColor 1px,transparent 1px);background-size:40px 40px;}\
.pattern-lines{background-image:repeating-linear-gradient(45deg,currentColor 0,currentColor 1px,transparent 1px,transparent 12px);}";

/// Token variables followed by the light-mode swap.
pub fn token_styles(tokens: &DesignTokens) -> String {
    format!("{}{}", tokens.to_css_vars(), tokens.to_light_mode_css())
}
