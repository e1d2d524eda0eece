// File: src/emit.rs
// Purpose: Render the generated routes module and router component
//
// Rendering consumes only the route and component tables; it never looks
// at the filesystem.

use crate::config::RoutingMode;
use crate::error::Result;
use crate::route::RouteOutput;

const GENERATOR_NAME: &str = env!("CARGO_PKG_NAME");

/// Renders the `getRoutes()` module
///
/// Routes are inlined as JSON in table order; each component is a lazily
/// imported module wrapped in `withLazyLoad`.
pub fn render_routes_module(output: &RouteOutput) -> Result<String> {
    let mut routes = Vec::with_capacity(output.routes.len());
    for (id, record) in &output.routes {
        routes.push(format!("{}:{}", serde_json::to_string(id)?, serde_json::to_string(record)?));
    }

    let mut components = Vec::with_capacity(output.route_components.len());
    for (id, spec) in &output.route_components {
        components.push(format!(
            "      {}: withLazyLoad(React.lazy(() => import(/* webpackChunkName: \"{}\" */ {})))",
            serde_json::to_string(id)?,
            chunk_name(spec),
            serde_json::to_string(spec)?
        ));
    }

    let lines = [
        "// @ts-nocheck".to_string(),
        format!("// this file is generated by {}", GENERATOR_NAME),
        "// do not change anytime!".to_string(),
        "import React, { Suspense } from 'react';".to_string(),
        String::new(),
        "function withLazyLoad(LazyComponent) {".to_string(),
        "  const lazyComponentWrapper = (props) => (".to_string(),
        "    <Suspense fallback={props.loadingComponent}>".to_string(),
        "      <LazyComponent {...props} />".to_string(),
        "    </Suspense>".to_string(),
        "  );".to_string(),
        "  return lazyComponentWrapper;".to_string(),
        "}".to_string(),
        String::new(),
        "export function getRoutes() {".to_string(),
        format!("  const routes = {{{}}};", routes.join(",")),
        "  return {".to_string(),
        "    routes,".to_string(),
        "    routeComponents: {".to_string(),
        components.join(",\n"),
        "    },".to_string(),
        "  };".to_string(),
        "}".to_string(),
        String::new(),
    ];

    Ok(lines.join("\n"))
}

/// Renders the router entry component
///
/// Layout routes are skipped as leaves; a page with a `parentId` is
/// nested under its layout's element. Unmatched paths redirect to
/// `index_path`.
pub fn render_router_component(mode: RoutingMode, index_path: &str, typescript: bool) -> String {
    let mut lines: Vec<String> = vec![
        "import React from 'react';".to_string(),
        format!(
            "import {{ {} as Router, Route, Routes, Navigate }} from 'react-router-dom';",
            mode.router_component()
        ),
        "import { getRoutes } from './routes';".to_string(),
    ];

    if typescript {
        lines.extend(
            [
                "",
                "interface RouteConfig {",
                "  id: string;",
                "  parentId?: string;",
                "  path: string;",
                "  isLayout?: boolean;",
                "  [key: string]: any;",
                "}",
                "",
                "type RoutesMap = Record<string, RouteConfig>;",
                "type RouteComponentsMap = Record<string, React.ComponentType<any>>;",
            ]
            .map(String::from),
        );
    }

    lines.push(String::new());
    lines.push("export default function AppRouter() {".to_string());
    lines.push(if typescript {
        "  const { routes, routeComponents }: { routes: RoutesMap; routeComponents: RouteComponentsMap } = getRoutes();"
            .to_string()
    } else {
        "  const { routes, routeComponents } = getRoutes();".to_string()
    });

    lines.extend(
        [
            "",
            "  const renderRoutes = () => {",
            "    return Object.keys(routeComponents).map((key) => {",
            "      const { id, parentId, path, isLayout } = routes[key];",
            "      if (isLayout) return null;",
            "      const LayoutComponent = parentId ? routeComponents[parentId] : null;",
            "      const Component = routeComponents[id];",
            "      if (LayoutComponent) {",
            "        return (",
            "          <Route element={<LayoutComponent />} key={key}>",
            "            <Route key={id} path={path} element={<Component />} />",
            "          </Route>",
            "        );",
            "      }",
            "      return <Route key={id} path={path} element={<Component />} />;",
            "    });",
            "  };",
            "",
            "  return (",
            "    <Router>",
            "      <Routes>",
            "        {renderRoutes()}",
        ]
        .map(String::from),
    );
    lines.push(format!(
        "        <Route path=\"*\" element={{<Navigate to={} />}} />",
        jsx_string(index_path)
    ));
    lines.extend(["      </Routes>", "    </Router>", "  );", "}", ""].map(String::from));

    lines.join("\n")
}

/// Deterministic chunk name for a component import
///
/// Last two path parts (extension stripped) joined by `_`, plus a base36
/// hash of the whole path: `../pages/user/$id.tsx` → `user_$id_<hash>`.
pub fn chunk_name(spec: &str) -> String {
    let trimmed = spec
        .split('/')
        .skip_while(|s| *s == "." || *s == "..")
        .collect::<Vec<_>>()
        .join("/");
    let stem = crate::classify::PAGE_FILE_REGEX.replace(&trimmed, "");

    let parts: Vec<&str> = stem.split('/').filter(|s| !s.is_empty()).collect();
    let tail = &parts[parts.len().saturating_sub(2)..];

    format!("{}_{}", tail.join("_"), simple_hash(&stem))
}

/// `h = (h * 31 + unit) mod 10^8` over UTF-16 code units, rendered base36
pub fn simple_hash(input: &str) -> String {
    let hash = input
        .encode_utf16()
        .fold(0u64, |h, unit| (h * 31 + u64::from(unit)) % 100_000_000);
    to_base36(hash)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn jsx_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
